use std::env;

const RTL_LANGUAGES: [&str; 4] = ["ar", "he", "fa", "ur"];

pub fn user_language() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

pub fn is_rtl(language_tag: &str) -> bool {
    let tag = language_tag.trim().to_ascii_lowercase();
    RTL_LANGUAGES.iter().any(|code| tag.starts_with(code))
}

pub fn layout_is_rtl(rtl_override: Option<bool>) -> bool {
    rtl_override.unwrap_or_else(|| user_language().is_some_and(|tag| is_rtl(&tag)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rtl_prefixes_are_detected() {
        for tag in ["ar", "ar_EG.UTF-8", "he-IL", "fa_IR", "ur", "AR-sa"] {
            assert!(is_rtl(tag), "{tag} should be right-to-left");
        }
    }

    #[test]
    fn ltr_tags_are_not_rtl() {
        for tag in ["en_US.UTF-8", "fr-FR", "de", "C", "POSIX", ""] {
            assert!(!is_rtl(tag), "{tag} should be left-to-right");
        }
    }

    #[test]
    fn override_wins_over_environment() {
        assert!(layout_is_rtl(Some(true)));
        assert!(!layout_is_rtl(Some(false)));
    }
}
