//! The searchable id picker: a modal session editing exactly one captured
//! target field, with case-insensitive subsequence matching over the
//! candidate ids the UI supplies for that target.

/// Which field a picker session writes into when confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerTarget {
    /// The document's fill terrain id.
    FillTerrain,
    /// The terrain id mapped to a palette symbol.
    SymbolTerrain(char),
    /// The furniture id mapped to a palette symbol.
    SymbolFurniture(char),
    /// The zone tool's group id (and the selected zone's, if any).
    ZoneGroup,
}

/// An open picker session. At most one exists at a time; confirming or
/// canceling closes it, and no later picker event can touch the state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSession {
    pub target: PickerTarget,
    pub search: String,
    /// Index into the visible (filtered) candidate list.
    pub selected: usize,
}

impl PickerSession {
    pub fn open(target: PickerTarget, initial_search: impl Into<String>) -> Self {
        Self {
            target,
            search: initial_search.into(),
            selected: 0,
        }
    }
}

/// True when every character of `query` appears in `candidate` in order,
/// ignoring case.
pub fn subsequence_match(query: &str, candidate: &str) -> bool {
    let mut chars = candidate.chars().flat_map(char::to_lowercase);
    query
        .chars()
        .flat_map(char::to_lowercase)
        .all(|q| chars.any(|c| c == q))
}

/// Filters `candidates` down to subsequence matches for `query`, tightest
/// matches (shortest ids) first, ties broken alphabetically. An empty query
/// matches everything.
pub fn filter_candidates<'a, I>(candidates: I, query: &str) -> Vec<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut matched: Vec<&str> = candidates
        .into_iter()
        .filter(|c| subsequence_match(query, c))
        .collect();
    matched.sort_by(|a, b| a.len().cmp(&b.len()).then_with(|| a.cmp(b)));
    matched
}
