use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;

const STUDY_PATH: &str = "/study/general-conference";

macro_rules! selector {
    ($name:ident, $css:expr) => {
        pub(crate) static $name: LazyLock<Selector> = LazyLock::new(|| Selector::parse($css).unwrap());
    };
}

macro_rules! regex {
    ($name:ident, $regex:expr) => {
        pub(crate) static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($regex).unwrap());
    };
}

// Talk page structure.
selector!(TITLE_SELECTOR, "h1#title1");
selector!(FALLBACK_TITLE_SELECTOR, "title");
selector!(AUTHOR_NAME_SELECTOR, "p.author-name");
selector!(AUTHOR_ROLE_SELECTOR, "p.author-role");
selector!(BODY_BLOCK_SELECTOR, "div.body-block");
selector!(PARAGRAPH_SELECTOR, "p");
selector!(ANCHOR_SELECTOR, "a[href]");
selector!(TOPIC_ANCHOR_SELECTOR, r#"a[href*="/topics/"]"#);

// Conference index structure.
selector!(SESSION_ITEM_SELECTOR, r#"li[data-content-type="general-conference-session"]"#);
selector!(SESSION_TITLE_SELECTOR, "p.title");

// A specific conference is `/study/general-conference/<year>/<04|10>`; a
// decade selection page is the eight-digit form `/study/general-conference/19801989`.
regex!(CONFERENCE_URL_REGEX, format!(r"{STUDY_PATH}/(\d{{4}})/(04|10)").as_str());
regex!(DECADE_URL_REGEX, format!(r"{STUDY_PATH}/\d{{8}}").as_str());
regex!(TALK_URL_REGEX, format!(r"{STUDY_PATH}/\d{{4}}/(04|10)/.+").as_str());

// Byline lines: "By Elder Jeffrey R. Holland" and
// "Recently Released as Relief Society General President".
regex!(
    SPEAKER_REGEX,
    r"(?i)^(?:(?:presented\s+)?by\s+)?(?:(?:president|elder|brother|sister|bishop)\s+)?(?P<speaker>\S.*)$"
);
regex!(
    CALLING_REGEX,
    r"(?i)^(?P<qualifier>(?:recently\s+)?(?:(?:released|former)\s+)?(?:(?:as|member\s+of\s+the)\s+)?)(?P<calling>[a-zA-Z,\s()0-9-]+)$"
);
