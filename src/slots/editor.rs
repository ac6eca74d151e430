//! Slot-addressed edits on a [`SlotSequence`].
//!
//! Every operation works on absolute positions: a vacated slot stays vacant and
//! only [`move_with_push`] ever shifts cards that were not named by the caller.
//! Indices arrive signed because negative input is a caller mistake with its own
//! outcome per operation.

use super::{addressable, CardEntry, EditError, SlotSequence};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added { index: usize },
    AlreadyAdded,
}

impl AddOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            AddOutcome::Added { .. } => "added",
            AddOutcome::AlreadyAdded => "already_added",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    InvalidIndex,
}

impl RemoveOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            RemoveOutcome::Removed => "removed",
            RemoveOutcome::InvalidIndex => "invalid_index",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// `run_end` is the last cell the push touched; cells in `to..=run_end`
    /// may have changed.
    Moved { run_end: usize },
    Unchanged,
    InvalidFrom,
}

impl MoveOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            MoveOutcome::Moved { .. } | MoveOutcome::Unchanged => "ok",
            MoveOutcome::InvalidFrom => "invalid_from",
        }
    }
}

/// Put `entry` into the first vacant slot, or append it when there is none.
/// Ids already present in an occupied slot are left alone.
pub fn add_first_empty(seq: &mut SlotSequence, entry: CardEntry) -> AddOutcome {
    if seq.contains_id(&entry.id) {
        return AddOutcome::AlreadyAdded;
    }

    let vacant = seq.iter().position(Option::is_none);
    match vacant {
        Some(index) => {
            if let Some(cell) = seq.cell_mut(index) {
                *cell = Some(entry);
            }
            AddOutcome::Added { index }
        }
        None => {
            seq.push(Some(entry));
            AddOutcome::Added {
                index: seq.len() - 1,
            }
        }
    }
}

/// Clear a slot in place. Never compacts.
pub fn remove(seq: &mut SlotSequence, index: i64) -> RemoveOutcome {
    match usize::try_from(index) {
        Ok(i) if i < seq.len() => {
            seq.take(i);
            RemoveOutcome::Removed
        }
        _ => RemoveOutcome::InvalidIndex,
    }
}

/// Relocate the card at `from` to `to`, pushing occupants forward one cell at a
/// time until the carried card reaches a vacant slot.
///
/// The gap left at `from` is never a landing spot, so dropping a card onto an
/// occupied cell always lands it exactly there rather than one slot early.
/// Only the cards between `to` and the final landing cell shift, each by one.
pub fn move_with_push(
    seq: &mut SlotSequence,
    from: i64,
    to: i64,
) -> Result<MoveOutcome, EditError> {
    let from = match usize::try_from(from) {
        Ok(i) if seq.is_occupied(i) => i,
        _ => return Ok(MoveOutcome::InvalidFrom),
    };
    let to = addressable(to.max(0))?;

    seq.extend_to(to)?;
    if from == to {
        return Ok(MoveOutcome::Unchanged);
    }

    let Some(mut carry) = seq.take(from) else {
        return Ok(MoveOutcome::InvalidFrom);
    };

    let mut pos = to;
    loop {
        if pos == from {
            pos += 1;
            continue;
        }
        if pos >= seq.len() {
            seq.push(Some(carry));
            return Ok(MoveOutcome::Moved { run_end: pos });
        }
        if let Some(cell) = seq.cell_mut(pos) {
            match cell {
                None => {
                    *cell = Some(carry);
                    return Ok(MoveOutcome::Moved { run_end: pos });
                }
                Some(occupant) => std::mem::swap(occupant, &mut carry),
            }
        }
        pos += 1;
    }
}

/// Exchange two cells, occupied or not. Nothing else moves.
pub fn swap(seq: &mut SlotSequence, a: i64, b: i64) -> Result<(), EditError> {
    let a = addressable(a)?;
    let b = addressable(b)?;
    seq.extend_to(a.max(b))?;
    seq.swap_cells(a, b);
    Ok(())
}

/// Move a card into a vacant cell without displacing anything.
pub fn place(seq: &mut SlotSequence, from: i64, to: i64) -> Result<(), EditError> {
    let from = addressable(from)?;
    let to = addressable(to)?;

    if !seq.is_occupied(from) {
        return Err(EditError::EmptySource);
    }
    if seq.is_occupied(to) {
        return Err(EditError::DestinationOccupied);
    }

    seq.extend_to(to)?;
    let entry = seq.take(from);
    if let Some(cell) = seq.cell_mut(to) {
        *cell = entry;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::{card, Slot, MAX_SLOT_INDEX};
    use proptest::prelude::*;

    fn seq(ids: &[Option<&str>]) -> SlotSequence {
        SlotSequence::from(ids.iter().map(|id| id.map(card)).collect::<Vec<Slot>>())
    }

    fn ids(seq: &SlotSequence) -> Vec<Option<String>> {
        seq.iter()
            .map(|s| s.as_ref().map(|c| c.id.clone()))
            .collect()
    }

    fn layout(ids: &[Option<&str>]) -> Vec<Option<String>> {
        ids.iter().map(|id| id.map(str::to_string)).collect()
    }

    #[test]
    fn add_fills_first_gap_without_growing() {
        let mut s = seq(&[Some("a"), None, Some("c"), None]);
        let outcome = add_first_empty(&mut s, card("n"));
        assert_eq!(outcome, AddOutcome::Added { index: 1 });
        assert_eq!(s.len(), 4);
        assert_eq!(ids(&s), layout(&[Some("a"), Some("n"), Some("c"), None]));
    }

    #[test]
    fn add_appends_when_full() {
        let mut s = seq(&[Some("a"), Some("b")]);
        assert_eq!(
            add_first_empty(&mut s, card("c")),
            AddOutcome::Added { index: 2 }
        );
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn add_duplicate_is_noop() {
        let mut s = seq(&[None, Some("a")]);
        let before = s.clone();
        let outcome = add_first_empty(&mut s, card("a"));
        assert_eq!(outcome.status(), "already_added");
        assert_eq!(s, before);
    }

    #[test]
    fn remove_leaves_gap() {
        let mut s = seq(&[Some("a"), Some("b"), Some("c")]);
        assert_eq!(remove(&mut s, 1), RemoveOutcome::Removed);
        assert_eq!(ids(&s), layout(&[Some("a"), None, Some("c")]));
    }

    #[test]
    fn remove_out_of_range_is_soft() {
        let mut s = seq(&[Some("a")]);
        assert_eq!(remove(&mut s, 1).status(), "invalid_index");
        assert_eq!(remove(&mut s, -1).status(), "invalid_index");
        assert_eq!(ids(&s), layout(&[Some("a")]));
    }

    #[test]
    fn move_forward_pushes_occupant() {
        let mut s = seq(&[Some("a"), Some("b"), Some("c")]);
        let outcome = move_with_push(&mut s, 0, 2).unwrap();
        assert_eq!(outcome, MoveOutcome::Moved { run_end: 3 });
        assert_eq!(ids(&s), layout(&[None, Some("b"), Some("a"), Some("c")]));
    }

    #[test]
    fn move_backward_skips_origin_gap() {
        let mut s = seq(&[Some("a"), Some("b"), Some("c")]);
        move_with_push(&mut s, 2, 0).unwrap();
        // a is pushed to 1, b would land on the origin gap at 2 but skips it
        assert_eq!(ids(&s), layout(&[Some("c"), Some("a"), None, Some("b")]));
    }

    #[test]
    fn move_stops_at_first_gap() {
        let mut s = seq(&[Some("a"), Some("b"), None, Some("d"), Some("e")]);
        move_with_push(&mut s, 4, 0).unwrap();
        assert_eq!(
            ids(&s),
            layout(&[Some("e"), Some("a"), Some("b"), Some("d"), None])
        );
    }

    #[test]
    fn move_past_end_extends() {
        let mut s = seq(&[Some("a")]);
        let outcome = move_with_push(&mut s, 0, 5).unwrap();
        assert_eq!(outcome, MoveOutcome::Moved { run_end: 5 });
        assert_eq!(s.len(), 6);
        assert!(!s.is_occupied(0));
        assert_eq!(s.get(5).map(|c| c.id.as_str()), Some("a"));
    }

    #[test]
    fn move_clamps_negative_target() {
        let mut s = seq(&[None, Some("a")]);
        move_with_push(&mut s, 1, -4).unwrap();
        assert_eq!(ids(&s), layout(&[Some("a"), None]));
    }

    #[test]
    fn move_from_empty_or_missing_is_invalid() {
        let mut s = seq(&[None, Some("a")]);
        let before = s.clone();
        assert_eq!(
            move_with_push(&mut s, 0, 1).unwrap(),
            MoveOutcome::InvalidFrom
        );
        assert_eq!(
            move_with_push(&mut s, 9, 0).unwrap(),
            MoveOutcome::InvalidFrom
        );
        assert_eq!(
            move_with_push(&mut s, -1, 0).unwrap(),
            MoveOutcome::InvalidFrom
        );
        assert_eq!(s, before);
    }

    #[test]
    fn move_onto_itself_is_noop() {
        let mut s = seq(&[Some("a"), Some("b")]);
        let before = s.clone();
        let outcome = move_with_push(&mut s, 1, 1).unwrap();
        assert_eq!(outcome, MoveOutcome::Unchanged);
        assert_eq!(outcome.status(), "ok");
        assert_eq!(s, before);
    }

    #[test]
    fn move_to_runaway_index_is_rejected_untouched() {
        let mut s = seq(&[Some("a")]);
        let before = s.clone();
        let err = move_with_push(&mut s, 0, (MAX_SLOT_INDEX + 1) as i64).unwrap_err();
        assert!(matches!(err, EditError::IndexTooLarge(_)));
        assert_eq!(s, before);
    }

    #[test]
    fn swap_extends_and_exchanges() {
        let mut s = seq(&[Some("a")]);
        swap(&mut s, 0, 3).unwrap();
        assert_eq!(ids(&s), layout(&[None, None, None, Some("a")]));
    }

    #[test]
    fn swap_rejects_negative() {
        let mut s = seq(&[Some("a")]);
        assert_eq!(swap(&mut s, -1, 0), Err(EditError::NegativeIndex(-1)));
        assert_eq!(ids(&s), layout(&[Some("a")]));
    }

    #[test]
    fn place_into_gap() {
        let mut s = seq(&[Some("a"), None, Some("c")]);
        place(&mut s, 0, 1).unwrap();
        assert_eq!(ids(&s), layout(&[None, Some("a"), Some("c")]));
    }

    #[test]
    fn place_rejects_occupied_destination() {
        let mut s = seq(&[Some("a"), Some("b")]);
        assert_eq!(place(&mut s, 0, 1), Err(EditError::DestinationOccupied));
        assert_eq!(ids(&s), layout(&[Some("a"), Some("b")]));
    }

    #[test]
    fn place_twice_fails_with_empty_source() {
        let mut s = seq(&[Some("a")]);
        place(&mut s, 0, 4).unwrap();
        assert_eq!(s.len(), 5);
        assert_eq!(place(&mut s, 0, 4), Err(EditError::EmptySource));
    }

    #[test]
    fn place_failure_does_not_extend() {
        let mut s = seq(&[None]);
        assert_eq!(place(&mut s, 0, 8), Err(EditError::EmptySource));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn binder_session_walkthrough() {
        let mut s = SlotSequence::new();
        add_first_empty(&mut s, card("card-1"));
        add_first_empty(&mut s, card("card-2"));
        assert_eq!(ids(&s), layout(&[Some("card-1"), Some("card-2")]));

        remove(&mut s, 0);
        assert_eq!(ids(&s), layout(&[None, Some("card-2")]));

        add_first_empty(&mut s, card("card-3"));
        assert_eq!(ids(&s), layout(&[Some("card-3"), Some("card-2")]));

        move_with_push(&mut s, 1, 0).unwrap();
        assert_eq!(
            ids(&s),
            layout(&[Some("card-2"), None, Some("card-3")])
        );
    }

    fn arb_sequence() -> impl Strategy<Value = SlotSequence> {
        prop::collection::vec(any::<bool>(), 0..24).prop_map(|mask| {
            SlotSequence::from(
                mask.iter()
                    .enumerate()
                    .map(|(i, filled)| filled.then(|| card(&format!("c{i}"))))
                    .collect::<Vec<Slot>>(),
            )
        })
    }

    proptest! {
        #[test]
        fn prop_move_preserves_relative_order(
            before in arb_sequence(),
            from in 0i64..30,
            to in -3i64..34,
        ) {
            let mut after = before.clone();
            let outcome = move_with_push(&mut after, from, to).unwrap();

            let Some(moved) = usize::try_from(from).ok().and_then(|f| before.get(f)).cloned() else {
                prop_assert_eq!(outcome, MoveOutcome::InvalidFrom);
                prop_assert_eq!(&after, &before);
                return Ok(());
            };

            let others = |s: &SlotSequence| -> Vec<String> {
                s.occupied().filter(|c| c.id != moved.id).map(|c| c.id.clone()).collect()
            };
            prop_assert_eq!(others(&after), others(&before));
            prop_assert_eq!(after.occupied().count(), before.occupied().count());

            let from = from as usize;
            let to = to.max(0) as usize;
            match outcome {
                MoveOutcome::Unchanged => prop_assert_eq!(&after, &before),
                MoveOutcome::Moved { run_end } => {
                    prop_assert!(run_end >= to);
                    prop_assert!(!after.is_occupied(from));
                    prop_assert_eq!(after.get(to).map(|c| &c.id), Some(&moved.id));
                    prop_assert!(after.len() <= before.len().max(to + 1) + 1);
                    for i in 0..after.len() {
                        if i == from || (to..=run_end).contains(&i) {
                            continue;
                        }
                        prop_assert_eq!(after.get(i), before.get(i));
                    }
                }
                MoveOutcome::InvalidFrom => prop_assert!(false, "occupied origin rejected"),
            }
        }

        #[test]
        fn prop_swap_is_involution(
            before in arb_sequence(),
            a in 0i64..30,
            b in 0i64..30,
        ) {
            let mut once = before.clone();
            swap(&mut once, a, b).unwrap();
            let mut twice = once.clone();
            swap(&mut twice, a, b).unwrap();

            let mut extended = before.clone();
            extended.extend_to(a.max(b) as usize).unwrap();
            prop_assert_eq!(twice, extended);
        }

        #[test]
        fn prop_remove_touches_only_target(
            before in arb_sequence(),
            index in -2i64..30,
        ) {
            let mut after = before.clone();
            let outcome = remove(&mut after, index);
            prop_assert_eq!(after.len(), before.len());
            for i in 0..before.len() {
                if outcome == RemoveOutcome::Removed && i as i64 == index {
                    prop_assert!(!after.is_occupied(i));
                } else {
                    prop_assert_eq!(after.slots().get(i), before.slots().get(i));
                }
            }
        }

        #[test]
        fn prop_place_never_displaces(
            before in arb_sequence(),
            from in 0i64..30,
            to in 0i64..30,
        ) {
            let mut after = before.clone();
            match place(&mut after, from, to) {
                Ok(()) => {
                    let (from, to) = (from as usize, to as usize);
                    prop_assert_ne!(from, to);
                    prop_assert_eq!(after.get(to), before.get(from));
                    prop_assert!(!after.is_occupied(from));
                    prop_assert_eq!(after.occupied().count(), before.occupied().count());
                }
                Err(_) => prop_assert_eq!(&after, &before),
            }
        }
    }
}
