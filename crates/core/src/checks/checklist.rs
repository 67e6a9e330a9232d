//! Checklist items and the toggle rule.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::status::CheckStatus;

/// One sub-task of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stable identity; labels are not unique.
    pub id: Uuid,
    pub label: String,
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
            checked: false,
        }
    }
}

/// Client-supplied checklist item. Items without an id get a fresh one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ChecklistItemInput {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    #[serde(default)]
    pub checked: bool,
}

impl ChecklistItemInput {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: None,
            label: label.into(),
            checked: false,
        }
    }
}

impl From<ChecklistItemInput> for ChecklistItem {
    fn from(input: ChecklistItemInput) -> Self {
        Self {
            id: input.id.unwrap_or_else(Uuid::new_v4),
            label: input.label,
            checked: input.checked,
        }
    }
}

/// Turn client input into stored items, assigning ids where missing.
pub fn build_checklist(inputs: Vec<ChecklistItemInput>) -> Vec<ChecklistItem> {
    inputs.into_iter().map(ChecklistItem::from).collect()
}

/// How a toggle addresses its item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemRef {
    Id(Uuid),
    /// First item whose label matches exactly.
    Label(String),
}

impl std::fmt::Display for ItemRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Label(label) => write!(f, "label '{label}'"),
        }
    }
}

/// An empty checklist counts as fully checked.
pub fn all_checked(checklist: &[ChecklistItem]) -> bool {
    checklist.iter().all(|item| item.checked)
}

/// Index of the item addressed by `item`, if any.
pub fn find_item(checklist: &[ChecklistItem], item: &ItemRef) -> Option<usize> {
    match item {
        ItemRef::Id(id) => checklist.iter().position(|i| i.id == *id),
        ItemRef::Label(label) => checklist.iter().position(|i| i.label == *label),
    }
}

/// Status after a checklist item changed.
///
/// A fully ticked list is `Completed`. Leaving `Completed` falls back to
/// `Upcoming`, not the date-derived value; the next read recomputes it.
/// Any other combination keeps `previous`, which callers pass as the
/// date-derived status for today.
pub fn status_after_toggle(previous: CheckStatus, all_checked: bool) -> CheckStatus {
    if all_checked {
        CheckStatus::Completed
    } else if previous == CheckStatus::Completed {
        CheckStatus::Upcoming
    } else {
        previous
    }
}

/// Flip the addressed item in place and return the resulting status.
///
/// Returns `None` (and leaves the list untouched) when no item matches.
pub fn toggle(
    checklist: &mut [ChecklistItem],
    item: &ItemRef,
    previous: CheckStatus,
) -> Option<CheckStatus> {
    let index = find_item(checklist, item)?;
    checklist[index].checked = !checklist[index].checked;
    Some(status_after_toggle(previous, all_checked(checklist)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(labels: &[&str]) -> Vec<ChecklistItem> {
        labels.iter().map(|l| ChecklistItem::new(*l)).collect()
    }

    #[test]
    fn empty_checklist_is_all_checked() {
        assert!(all_checked(&[]));
    }

    #[test]
    fn toggle_a_then_b_completes_then_b_again_reverts_to_upcoming() {
        let mut list = items(&["A", "B"]);
        let a = ItemRef::Id(list[0].id);
        let b = ItemRef::Id(list[1].id);

        let status = toggle(&mut list, &a, CheckStatus::WarningWeek).unwrap();
        assert_eq!(status, CheckStatus::WarningWeek);

        let status = toggle(&mut list, &b, status).unwrap();
        assert_eq!(status, CheckStatus::Completed);

        let status = toggle(&mut list, &b, status).unwrap();
        assert_eq!(status, CheckStatus::Upcoming);
        assert!(list[0].checked);
        assert!(!list[1].checked);
    }

    #[test]
    fn unchecking_while_not_completed_keeps_status() {
        assert_eq!(
            status_after_toggle(CheckStatus::Late, false),
            CheckStatus::Late
        );
    }

    #[test]
    fn label_ref_hits_first_duplicate_only() {
        let mut list = items(&["Test valve", "Test valve"]);
        toggle(&mut list, &ItemRef::Label("Test valve".into()), CheckStatus::Upcoming).unwrap();
        assert!(list[0].checked);
        assert!(!list[1].checked);
    }

    #[test]
    fn id_ref_reaches_second_duplicate() {
        let mut list = items(&["Test valve", "Test valve"]);
        let second = ItemRef::Id(list[1].id);
        toggle(&mut list, &second, CheckStatus::Upcoming).unwrap();
        assert!(!list[0].checked);
        assert!(list[1].checked);
    }

    #[test]
    fn unknown_item_leaves_list_untouched() {
        let mut list = items(&["A"]);
        let before = list.clone();
        assert!(toggle(&mut list, &ItemRef::Label("Z".into()), CheckStatus::Upcoming).is_none());
        assert_eq!(list, before);
    }

    #[test]
    fn build_checklist_keeps_supplied_ids() {
        let id = Uuid::new_v4();
        let built = build_checklist(vec![
            ChecklistItemInput {
                id: Some(id),
                label: "Keep".into(),
                checked: true,
            },
            ChecklistItemInput::new("Fresh"),
        ]);
        assert_eq!(built[0].id, id);
        assert!(built[0].checked);
        assert_ne!(built[1].id, id);
        assert!(!built[1].checked);
    }

    #[test]
    fn empty_label_fails_validation() {
        assert!(ChecklistItemInput::new("").validate().is_err());
        assert!(ChecklistItemInput::new("Inspect extinguisher").validate().is_ok());
    }
}
