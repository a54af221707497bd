//! Fixtures shared by the unit tests of this crate.

use chrono::{TimeZone, Utc};
use japan_info_shared::{ContentDetail, ContentSummary};

pub fn article(id: &str, day: u32, tags: &[&str]) -> ContentDetail {
    let published_at = Utc
        .with_ymd_and_hms(2024, 6, day, 12, 0, 0)
        .single()
        .expect("valid fixture date");
    ContentDetail {
        id: id.to_string(),
        title: format!("{id} の紹介"),
        title_ko: Some(format!("{id} 소개")),
        description: format!("{id} の説明"),
        description_ko: None,
        cover_image: format!("/images/{id}.jpg"),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        popular: day % 2 == 0,
        published_at,
        content: format!("## {id}\n\n本文です。"),
        content_ko: Some(format!("## {id}\n\n본문입니다.")),
        gallery: vec![format!("/images/{id}-1.jpg")],
        author: "編集部".to_string(),
        view_count: u64::from(day) * 10,
        updated_at: published_at,
    }
}

pub fn summary(id: &str) -> ContentSummary {
    article(id, 1, &[]).summary()
}

/// Ten records; `ichiran` is tagged `ramen`/`tokyo` and exactly three
/// others share one of those tags.
pub fn sample_corpus() -> Vec<ContentDetail> {
    vec![
        article("ichiran", 1, &["ramen", "tokyo"]),
        article("afuri", 2, &["ramen", "yuzu"]),
        article("sukiyabashi", 3, &["sushi", "tokyo"]),
        article("fuunji", 4, &["tsukemen", "tokyo"]),
        article("kani-doraku", 5, &["crab", "osaka"]),
        article("torikizoku", 6, &["yakitori", "osaka"]),
        article("mizuno", 7, &["okonomiyaki", "osaka"]),
        article("gion-tanto", 8, &["okonomiyaki", "kyoto"]),
        article("honke-owariya", 9, &["soba", "kyoto"]),
        article("daikokuya", 10, &["tempura", "asakusa"]),
    ]
}
