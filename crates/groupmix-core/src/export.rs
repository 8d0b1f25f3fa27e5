//! Plain-text rendering of generated groups, for pasting into chat apps.

use crate::models::Group;

/// Header line at the top of an export
const EXPORT_HEADER: &str = "_GROUPS_";

/// Render `groups` as text.
///
/// A header line and a blank line come first, then each group as a `*id*`
/// line followed by one member per line, with groups separated by a blank
/// line. Leaders are wrapped in `*` only when `require_leader` is on.
pub fn format_groups_as_text(groups: &[Group], require_leader: bool) -> String {
    if groups.is_empty() {
        return String::new();
    }

    let body = groups
        .iter()
        .map(|group| {
            let mut lines = vec![format!("*{}*", group.id)];
            lines.extend(group.members.iter().map(|member| {
                if require_leader && member.is_leader {
                    format!("*{}*", member.name)
                } else {
                    member.name.clone()
                }
            }));
            lines.join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n{}", EXPORT_HEADER, body)
}
