//! Class-name composition with override precedence.
//!
//! Elements carry utility class lists (`px-6`, `bg-transparent`,
//! `md:hidden`). Lists are built from conditional parts; when two tokens
//! target the same utility group under the same variants, the later one
//! wins and the earlier one is dropped. Shorthands also clear the longhands
//! they cover: `p-4` drops an earlier `px-6`, `border-y` drops `border-t`,
//! but `border-t border-b` keeps both.
//!
//! ```
//! use apex_ui::cn;
//!
//! let scrolled = true;
//! let classes = cn!("fixed px-6 bg-transparent", scrolled.then_some("bg-apex-black/80"));
//! assert_eq!(classes.to_string(), "fixed px-6 bg-apex-black/80");
//! ```

use std::fmt;

/// An ordered, conflict-free list of class tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    tokens: Vec<String>,
}

impl ClassList {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges whitespace-separated `classes` into the list.
    pub fn add(&mut self, classes: &str) {
        for token in classes.split_whitespace() {
            self.merge_token(token);
        }
    }

    /// Merges `classes` only when `condition` holds.
    pub fn add_if(&mut self, condition: bool, classes: &str) {
        if condition {
            self.add(classes);
        }
    }

    /// Builder form of [`ClassList::add`].
    #[must_use]
    pub fn with(mut self, classes: &str) -> Self {
        self.add(classes);
        self
    }

    /// Returns true if the exact token is present.
    #[must_use]
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    /// Iterates over the tokens in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true when there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    fn merge_token(&mut self, token: &str) {
        let key = conflict_key(token);
        self.tokens.retain(|existing| match (&key, conflict_key(existing)) {
            (Some((variants, group)), Some((old_variants, old_group))) => {
                *variants != old_variants || !overrides(group, old_group)
            }
            _ => existing != token,
        });
        self.tokens.push(token.to_owned());
    }
}

impl fmt::Display for ClassList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for token in &self.tokens {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(token)?;
            first = false;
        }
        Ok(())
    }
}

/// Anything that can contribute class tokens to a [`ClassList`].
pub trait ClassPart {
    /// Merges this part into `list`.
    fn merge_into(self, list: &mut ClassList);
}

impl ClassPart for &str {
    fn merge_into(self, list: &mut ClassList) {
        list.add(self);
    }
}

impl ClassPart for String {
    fn merge_into(self, list: &mut ClassList) {
        list.add(&self);
    }
}

impl ClassPart for &String {
    fn merge_into(self, list: &mut ClassList) {
        list.add(self);
    }
}

impl ClassPart for &ClassList {
    fn merge_into(self, list: &mut ClassList) {
        for token in self.iter() {
            list.merge_token(token);
        }
    }
}

impl<T: ClassPart> ClassPart for Option<T> {
    fn merge_into(self, list: &mut ClassList) {
        if let Some(part) = self {
            part.merge_into(list);
        }
    }
}

/// Composes a [`ClassList`] from strings, options and other lists.
#[macro_export]
macro_rules! cn {
    ($($part:expr),* $(,)?) => {{
        #[allow(unused_mut)]
        let mut list = $crate::class::ClassList::new();
        $( $crate::class::ClassPart::merge_into($part, &mut list); )*
        list
    }};
}

/// `(variants, group)` for a token, or `None` when the utility is unknown.
fn conflict_key(token: &str) -> Option<(String, &'static str)> {
    let (variants, utility) = split_variants(token);
    let utility = utility.trim_start_matches('!').trim_start_matches('-');
    utility_group(utility).map(|group| (variants.to_owned(), group))
}

/// Splits `md:hover:bg-white` into (`md:hover:`, `bg-white`), ignoring
/// colons inside arbitrary values like `bg-[url('https://...')]`.
fn split_variants(token: &str) -> (&str, &str) {
    let mut depth = 0_i32;
    let mut split = 0;
    for (i, ch) in token.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth -= 1,
            ':' if depth == 0 => split = i + 1,
            _ => {}
        }
    }
    token.split_at(split)
}

const DISPLAY: &[&str] = &[
    "block", "inline-block", "inline", "flex", "inline-flex", "grid", "inline-grid", "hidden",
    "contents",
];
const POSITION: &[&str] = &["static", "fixed", "absolute", "relative", "sticky"];
const FONT_SIZES: &[&str] = &[
    "xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl", "7xl", "8xl", "9xl",
];
const TEXT_ALIGN: &[&str] = &["left", "center", "right", "justify", "start", "end"];
const FONT_WEIGHTS: &[&str] = &[
    "thin", "extralight", "light", "normal", "medium", "semibold", "bold", "extrabold", "black",
];
const BORDER_STYLES: &[&str] = &["solid", "dashed", "dotted", "double", "hidden", "none"];

/// Longhand groups a shorthand group clears on top of its own.
const CONFLICTS: &[(&str, &[&str])] = &[
    ("p", &["px", "py", "pt", "pr", "pb", "pl"]),
    ("px", &["pr", "pl"]),
    ("py", &["pt", "pb"]),
    ("m", &["mx", "my", "mt", "mr", "mb", "ml"]),
    ("mx", &["mr", "ml"]),
    ("my", &["mt", "mb"]),
    ("inset", &["inset-x", "inset-y", "top", "right", "bottom", "left"]),
    ("inset-x", &["right", "left"]),
    ("inset-y", &["top", "bottom"]),
    (
        "border-w",
        &[
            "border-w-x", "border-w-y", "border-w-t", "border-w-r", "border-w-b", "border-w-l",
            "border-w-s", "border-w-e",
        ],
    ),
    ("border-w-x", &["border-w-r", "border-w-l"]),
    ("border-w-y", &["border-w-t", "border-w-b"]),
    (
        "border-color",
        &[
            "border-color-x", "border-color-y", "border-color-t", "border-color-r",
            "border-color-b", "border-color-l", "border-color-s", "border-color-e",
        ],
    ),
    ("border-color-x", &["border-color-r", "border-color-l"]),
    ("border-color-y", &["border-color-t", "border-color-b"]),
    (
        "rounded",
        &[
            "rounded-t", "rounded-r", "rounded-b", "rounded-l", "rounded-tl", "rounded-tr",
            "rounded-br", "rounded-bl",
        ],
    ),
    ("rounded-t", &["rounded-tl", "rounded-tr"]),
    ("rounded-r", &["rounded-tr", "rounded-br"]),
    ("rounded-b", &["rounded-br", "rounded-bl"]),
    ("rounded-l", &["rounded-tl", "rounded-bl"]),
];

/// Returns true if a token of `group` replaces an earlier token of `other`.
fn overrides(group: &str, other: &str) -> bool {
    group == other
        || CONFLICTS
            .iter()
            .find(|(shorthand, _)| *shorthand == group)
            .is_some_and(|(_, longhands)| longhands.contains(&other))
}

/// `border-t`, `border-t-2`: width of one side. `border-t-white`: its color.
fn border_side_group(side: &str, width: bool) -> Option<&'static str> {
    let group = match (side, width) {
        ("x", true) => "border-w-x",
        ("y", true) => "border-w-y",
        ("t", true) => "border-w-t",
        ("r", true) => "border-w-r",
        ("b", true) => "border-w-b",
        ("l", true) => "border-w-l",
        ("s", true) => "border-w-s",
        ("e", true) => "border-w-e",
        ("x", false) => "border-color-x",
        ("y", false) => "border-color-y",
        ("t", false) => "border-color-t",
        ("r", false) => "border-color-r",
        ("b", false) => "border-color-b",
        ("l", false) => "border-color-l",
        ("s", false) => "border-color-s",
        ("e", false) => "border-color-e",
        _ => return None,
    };
    Some(group)
}

fn rounded_group(utility: &str) -> &'static str {
    let corner = utility
        .strip_prefix("rounded-")
        .and_then(|rest| rest.split('-').next())
        .unwrap_or_default();
    match corner {
        "t" => "rounded-t",
        "r" => "rounded-r",
        "b" => "rounded-b",
        "l" => "rounded-l",
        "tl" => "rounded-tl",
        "tr" => "rounded-tr",
        "br" => "rounded-br",
        "bl" => "rounded-bl",
        _ => "rounded",
    }
}

fn is_width_value(value: &str) -> bool {
    value.is_empty() || value.chars().all(|c| c.is_ascii_digit()) || is_arbitrary_length(value)
}

/// Prefix table, longest prefixes first.
const PREFIX_GROUPS: &[(&str, &str)] = &[
    ("backdrop-blur", "backdrop-blur"),
    ("grid-cols-", "grid-cols"),
    ("col-span-", "col-span"),
    ("translate-x-", "translate-x"),
    ("translate-y-", "translate-y"),
    ("min-h-", "min-h"),
    ("min-w-", "min-w"),
    ("max-h-", "max-h"),
    ("max-w-", "max-w"),
    ("flex-col", "flex-direction"),
    ("flex-row", "flex-direction"),
    ("flex-wrap", "flex-wrap"),
    ("flex-nowrap", "flex-wrap"),
    ("opacity-", "opacity"),
    ("tracking-", "tracking"),
    ("leading-", "leading"),
    ("shadow", "shadow"),
    ("rotate-", "rotate"),
    ("scale-", "scale"),
    ("inset-x-", "inset-x"),
    ("inset-y-", "inset-y"),
    ("inset-", "inset"),
    ("top-", "top"),
    ("bottom-", "bottom"),
    ("left-", "left"),
    ("right-", "right"),
    ("duration-", "duration"),
    ("delay-", "delay"),
    ("transition", "transition"),
    ("transform", "transform"),
    ("cursor-", "cursor"),
    ("items-", "align-items"),
    ("justify-", "justify-content"),
    ("origin-", "transform-origin"),
    ("overflow-", "overflow"),
    ("whitespace-", "whitespace"),
    ("aspect-", "aspect"),
    ("object-", "object-fit"),
    ("animate-", "animation"),
    ("blur", "blur"),
    ("gap-", "gap"),
    ("px-", "px"),
    ("py-", "py"),
    ("pt-", "pt"),
    ("pr-", "pr"),
    ("pb-", "pb"),
    ("pl-", "pl"),
    ("p-", "p"),
    ("mx-", "mx"),
    ("my-", "my"),
    ("mt-", "mt"),
    ("mr-", "mr"),
    ("mb-", "mb"),
    ("ml-", "ml"),
    ("m-", "m"),
    ("w-", "w"),
    ("h-", "h"),
    ("z-", "z"),
];

fn utility_group(utility: &str) -> Option<&'static str> {
    if DISPLAY.contains(&utility) {
        return Some("display");
    }
    if POSITION.contains(&utility) {
        return Some("position");
    }

    if let Some(rest) = utility.strip_prefix("bg-") {
        if rest.starts_with("gradient") || rest.starts_with("[url") || rest == "none" {
            return Some("bg-image");
        }
        return Some("bg-color");
    }
    if let Some(rest) = utility.strip_prefix("text-") {
        if FONT_SIZES.contains(&rest) || is_arbitrary_length(rest) {
            return Some("font-size");
        }
        if TEXT_ALIGN.contains(&rest) {
            return Some("text-align");
        }
        return Some("text-color");
    }
    if let Some(rest) = utility.strip_prefix("font-") {
        if FONT_WEIGHTS.contains(&rest) {
            return Some("font-weight");
        }
        return Some("font-family");
    }
    if utility == "border" {
        return Some("border-w");
    }
    if let Some(rest) = utility.strip_prefix("border-") {
        if BORDER_STYLES.contains(&rest) {
            return Some("border-style");
        }
        let (side, value) = rest.split_once('-').unwrap_or((rest, ""));
        if let Some(group) = border_side_group(side, is_width_value(value)) {
            return Some(group);
        }
        if is_width_value(rest) {
            return Some("border-w");
        }
        return Some("border-color");
    }
    if utility.starts_with("rounded") {
        return Some(rounded_group(utility));
    }

    PREFIX_GROUPS
        .iter()
        .find(|(prefix, _)| utility.starts_with(prefix))
        .map(|(_, group)| *group)
}

/// `[12vw]`, `[10px]`: arbitrary values that start with a digit are lengths.
fn is_arbitrary_length(value: &str) -> bool {
    value
        .strip_prefix('[')
        .and_then(|inner| inner.chars().next())
        .is_some_and(|c| c.is_ascii_digit() || c == '.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_later_token_overrides_same_group() {
        let list = cn!("p-4 bg-transparent", "p-6 bg-apex-black/80");
        assert_eq!(list.to_string(), "p-6 bg-apex-black/80");
    }

    #[test]
    fn test_conditional_parts() {
        let scrolled = false;
        let list = cn!(
            "fixed top-0 bg-apex-black/80",
            (!scrolled).then_some("bg-transparent"),
            scrolled.then_some("backdrop-blur-md"),
        );
        assert!(list.contains("bg-transparent"));
        assert!(!list.contains("bg-apex-black/80"));
        assert!(!list.contains("backdrop-blur-md"));
    }

    #[test]
    fn test_text_size_and_color_coexist() {
        let list = cn!("text-sm text-white", "text-xl");
        assert_eq!(list.to_string(), "text-white text-xl");
    }

    #[test]
    fn test_variants_do_not_conflict_with_base() {
        let list = cn!("bg-apex-yellow hover:bg-white md:hidden flex");
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn test_border_width_and_color_are_separate() {
        let list = cn!("border-b border-white/10 border-transparent");
        assert_eq!(list.to_string(), "border-b border-transparent");
    }

    #[test]
    fn test_border_sides_are_independent() {
        assert_eq!(cn!("border-t border-b").to_string(), "border-t border-b");
        assert_eq!(cn!("border-l-2", "border-l-4").to_string(), "border-l-4");
        assert_eq!(
            cn!("border-t-white border-t").to_string(),
            "border-t-white border-t"
        );
        assert_eq!(cn!("border-solid border-white").len(), 2);
    }

    #[test]
    fn test_shorthand_clears_longhands() {
        assert_eq!(cn!("px-6", "p-4").to_string(), "p-4");
        assert_eq!(cn!("pt-2 pl-3 mx-auto", "p-0").to_string(), "mx-auto p-0");
        assert_eq!(cn!("border-t border-b", "border-y").to_string(), "border-y");
        assert_eq!(cn!("border-t-2 border-r", "border").to_string(), "border");
        assert_eq!(cn!("top-0 left-0 inset-x-4", "inset-0").to_string(), "inset-0");
        assert_eq!(cn!("top-0 left-0", "inset-x-0").to_string(), "top-0 inset-x-0");
        assert_eq!(cn!("rounded-tl-lg rounded-b", "rounded-full").to_string(), "rounded-full");
        assert_eq!(cn!("mt-2 mb-4", "my-0").to_string(), "my-0");
    }

    #[test]
    fn test_longhand_after_shorthand_is_kept() {
        assert_eq!(cn!("p-4", "px-6").to_string(), "p-4 px-6");
        assert_eq!(cn!("border", "border-t-0").to_string(), "border border-t-0");
        assert_eq!(cn!("md:p-4", "px-6").to_string(), "md:p-4 px-6");
    }

    #[test]
    fn test_arbitrary_values_keep_colons() {
        let list = cn!("bg-[url('https://example.com/a.png')] opacity-10");
        assert_eq!(list.len(), 2);
        assert_eq!(split_variants("md:text-[10vw]"), ("md:", "text-[10vw]"));
        assert_eq!(utility_group("text-[12vw]"), Some("font-size"));
    }

    #[test]
    fn test_unknown_tokens_dedupe_only() {
        let list = cn!("glass group glass text-stroke");
        assert_eq!(list.to_string(), "group glass text-stroke");
    }

    #[test]
    fn test_negative_utilities_share_group() {
        let list = cn!("-left-20 left-0");
        assert_eq!(list.to_string(), "left-0");
    }
}
