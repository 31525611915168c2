use crate::domain::model::RosterEntry;

/// Case-insensitive substring match on the display name, or substring match
/// on the decimal id. An empty or blank term keeps every entry.
pub fn filter_roster<'a>(roster: &'a [RosterEntry], term: &str) -> Vec<&'a RosterEntry> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return roster.iter().collect();
    }

    roster
        .iter()
        .filter(|entry| {
            entry.name.to_lowercase().contains(&term) || entry.id.to_string().contains(&term)
        })
        .collect()
}

/// Resolve a user query to a roster entry: `25`, `#025`, `pikachu`,
/// `Mr Mime` or `mr-mime`.
pub fn find_entry<'a>(roster: &'a [RosterEntry], query: &str) -> Option<&'a RosterEntry> {
    let query = query.trim();
    let numeric = query.trim_start_matches('#');
    if let Ok(id) = numeric.parse::<u32>() {
        return roster.iter().find(|entry| entry.id == id);
    }

    let wanted = query.to_lowercase();
    let wanted_key = wanted.replace(' ', "-");
    roster
        .iter()
        .find(|entry| entry.api_name == wanted_key || entry.name.to_lowercase() == wanted)
}

/// Move `current` by `delta` within `len` items, clamping at both ends.
pub fn step_index(current: Option<usize>, delta: isize, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let last = len - 1;
    match current {
        None => Some(0),
        Some(idx) => {
            let next = idx.min(last) as isize + delta;
            Some(next.clamp(0, last as isize) as usize)
        }
    }
}
