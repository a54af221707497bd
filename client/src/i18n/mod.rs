use japan_info_shared::Locale;

pub mod ja;
pub mod ko;

/// UI strings for one display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strings {
    pub loading: &'static str,
    pub empty_all: &'static str,
    pub empty_filtered: &'static str,
    pub result_count_template: &'static str,
    pub page_status_template: &'static str,
    pub popular_badge: &'static str,
    pub retry_hint: &'static str,
    pub generic_failure: &'static str,
    pub not_found: &'static str,
    pub related_heading: &'static str,
    pub related_empty: &'static str,
    pub previous_label: &'static str,
    pub next_label: &'static str,
    pub author_label: &'static str,
    pub views_label: &'static str,
    pub updated_label: &'static str,
    pub gallery_label: &'static str,
    pub tags_heading: &'static str,
}

pub fn strings(locale: Locale) -> &'static Strings {
    match locale {
        Locale::Ja => &ja::STRINGS,
        Locale::Ko => &ko::STRINGS,
    }
}

pub fn fill_one(template: &str, value: impl std::fmt::Display) -> String {
    template.replacen("{}", &value.to_string(), 1)
}

pub fn fill_two(
    template: &str,
    first: impl std::fmt::Display,
    second: impl std::fmt::Display,
) -> String {
    let first_pass = template.replacen("{}", &first.to_string(), 1);
    first_pass.replacen("{}", &second.to_string(), 1)
}
