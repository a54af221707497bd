use super::Strings;

pub const STRINGS: Strings = Strings {
    loading: "読み込み中...",
    empty_all: "まだ記事がありません。",
    empty_filtered: "条件に合う記事が見つかりませんでした。",
    result_count_template: "{}件の記事",
    page_status_template: "{} / {} ページ",
    popular_badge: "人気",
    retry_hint: "読み込みに失敗しました。もう一度お試しください。",
    generic_failure: "エラーが発生しました。",
    not_found: "お探しの記事は見つかりませんでした。",
    related_heading: "関連記事",
    related_empty: "関連記事はありません。",
    previous_label: "前の記事",
    next_label: "次の記事",
    author_label: "著者",
    views_label: "閲覧数",
    updated_label: "更新日",
    gallery_label: "ギャラリー",
    tags_heading: "タグ一覧",
};
