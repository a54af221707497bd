use super::Strings;

pub const STRINGS: Strings = Strings {
    loading: "불러오는 중...",
    empty_all: "아직 기사가 없습니다.",
    empty_filtered: "조건에 맞는 기사를 찾지 못했습니다.",
    result_count_template: "{}개의 기사",
    page_status_template: "{} / {} 페이지",
    popular_badge: "인기",
    retry_hint: "불러오지 못했습니다. 다시 시도해 주세요.",
    generic_failure: "오류가 발생했습니다.",
    not_found: "찾으시는 기사가 없습니다.",
    related_heading: "관련 기사",
    related_empty: "관련 기사가 없습니다.",
    previous_label: "이전 기사",
    next_label: "다음 기사",
    author_label: "작성자",
    views_label: "조회수",
    updated_label: "수정일",
    gallery_label: "갤러리",
    tags_heading: "태그 목록",
};
