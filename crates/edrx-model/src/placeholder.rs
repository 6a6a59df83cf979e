/// What an exported blank actually means.
///
/// The BI consumers distinguish "confirmed absent" from "not yet wired up":
/// columns whose source correlation is still under investigation, and
/// columns the source system does not populate in this environment, are
/// exported as a single space rather than an empty string. Keeping the
/// intent as an enum lets tests assert on meaning instead of whitespace.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderKind {
    /// Field confirmed absent or empty in the source. Renders as `""`.
    #[default]
    Empty,
    /// Source correlation not yet investigated. Renders as `" "`.
    Pending,
    /// Source system does not populate this field yet. Renders as `" "`.
    Unpopulated,
}

impl PlaceholderKind {
    pub fn render(self) -> &'static str {
        match self {
            PlaceholderKind::Empty => "",
            PlaceholderKind::Pending | PlaceholderKind::Unpopulated => " ",
        }
    }
}
