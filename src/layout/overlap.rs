// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Delve-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Delve and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::{GridPoint, Placement, Rect, RoomId, Topology};

pub const DEFAULT_OVERLAP_PASSES: usize = 50;

/// Axis a pair of rooms gets pushed apart on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushAxis {
    Horizontal,
    Vertical,
}

/// Picks the push axis from the center-to-center delta.
///
/// The axis with the larger absolute delta wins. Equal non-zero deltas push
/// vertically. Identical centers push horizontally, moving the lower room id
/// towards negative x.
pub fn push_axis(dx: f64, dy: f64) -> PushAxis {
    if dx == 0.0 && dy == 0.0 {
        return PushAxis::Horizontal;
    }
    if dx.abs() > dy.abs() {
        PushAxis::Horizontal
    } else {
        PushAxis::Vertical
    }
}

/// Returns the shifted pair, or `None` when the pair already satisfies the gap.
///
/// Each room moves by `floor((needed - |delta|) / 2) + 1` in opposite directions;
/// the extra tile keeps the pair strictly clear after truncation.
pub fn push_apart(r1: Rect, r2: Rect, min_gap: i32) -> Option<(Rect, Rect)> {
    if r1.is_separated_from(&r2, min_gap) {
        return None;
    }

    let (cx1, cy1) = r1.center_f64();
    let (cx2, cy2) = r2.center_f64();
    let (dx, dy) = (cx2 - cx1, cy2 - cy1);

    let (delta, size1, size2) = match push_axis(dx, dy) {
        PushAxis::Horizontal => (dx, r1.width, r2.width),
        PushAxis::Vertical => (dy, r1.height, r2.height),
    };
    let needed = f64::from(size1 + size2) / 2.0 + f64::from(min_gap);
    let shift = ((needed - delta.abs()) / 2.0).floor() as i32 + 1;
    // r2 sits on the positive side (or shares the center); push it further that way.
    let sign = if delta >= 0.0 { 1 } else { -1 };

    let (mut a, mut b) = (r1, r2);
    match push_axis(dx, dy) {
        PushAxis::Horizontal => {
            a.x -= sign * shift;
            b.x += sign * shift;
        }
        PushAxis::Vertical => {
            a.y -= sign * shift;
            b.y += sign * shift;
        }
    }
    Some((a, b))
}

/// Result of one resolver pass over an immutable snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOutcome {
    pub rects: Vec<(RoomId, Rect)>,
    pub moves: usize,
}

/// Runs a single pass: every unordered pair once, in `(i, j)` index order with `i < j`.
///
/// The pass works on its own copy, so later pairs see shifts made earlier in
/// the same pass, and the input snapshot is never touched.
pub fn resolve_pass(snapshot: &[(RoomId, Rect)], min_gap: i32) -> PassOutcome {
    let mut rects = snapshot.to_vec();
    let mut moves = 0usize;

    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if let Some((a, b)) = push_apart(rects[i].1, rects[j].1, min_gap) {
                rects[i].1 = a;
                rects[j].1 = b;
                moves += 1;
            }
        }
    }

    PassOutcome { rects, moves }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub placement: Placement,
    pub passes: usize,
    /// True when the last pass made no moves.
    pub converged: bool,
}

/// Iterative minimum-gap enforcement with a hard pass budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlapResolver {
    min_gap: i32,
    max_passes: usize,
}

impl OverlapResolver {
    pub fn new(min_gap: i32) -> Self {
        Self {
            min_gap,
            max_passes: DEFAULT_OVERLAP_PASSES,
        }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }

    pub fn min_gap(&self) -> i32 {
        self.min_gap
    }

    /// Resolves rectangles keyed by room id. Exhausting the budget is not an error;
    /// the best-effort result is returned with `converged == false`.
    pub fn resolve_rects(&self, rects: Vec<(RoomId, Rect)>) -> (Vec<(RoomId, Rect)>, usize, bool) {
        let mut current = rects;
        let mut passes = 0usize;
        let mut converged = false;

        while passes < self.max_passes {
            let outcome = resolve_pass(&current, self.min_gap);
            passes += 1;
            tracing::trace!(pass = passes, moves = outcome.moves, "overlap pass");
            current = outcome.rects;
            if outcome.moves == 0 {
                converged = true;
                break;
            }
        }

        (current, passes, converged)
    }

    /// Resolves a placement of `topology`'s rooms and renormalizes it to the origin.
    pub fn resolve(&self, topology: &Topology, placement: &Placement) -> Resolution {
        let (rects, passes, converged) = self.resolve_rects(placement.rects(topology));

        let placement = rects
            .into_iter()
            .map(|(id, rect)| (id, GridPoint::new(rect.x, rect.y)))
            .collect::<Placement>()
            .normalized();

        if converged {
            tracing::debug!(passes, "overlap resolution converged");
        } else {
            tracing::warn!(
                passes,
                min_gap = self.min_gap,
                "overlap resolution budget exhausted; residual gap violations may remain"
            );
        }

        Resolution {
            placement,
            passes,
            converged,
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{push_apart, push_axis, resolve_pass, OverlapResolver, PushAxis};
    use crate::model::{fixtures, GridPoint, Placement, Rect, RoomId};

    fn rid(value: u32) -> RoomId {
        RoomId::new(value)
    }

    fn all_pairs_separated(rects: &[(RoomId, Rect)], gap: i32) -> bool {
        rects.iter().enumerate().all(|(i, (_, a))| {
            rects[i + 1..].iter().all(|(_, b)| a.is_separated_from(b, gap))
        })
    }

    #[rstest]
    #[case(3.0, 1.0, PushAxis::Horizontal)]
    #[case(-3.0, 1.0, PushAxis::Horizontal)]
    #[case(1.0, -3.0, PushAxis::Vertical)]
    #[case(2.0, 2.0, PushAxis::Vertical)]
    #[case(0.0, 0.0, PushAxis::Horizontal)]
    fn chooses_push_axis(#[case] dx: f64, #[case] dy: f64, #[case] expected: PushAxis) {
        assert_eq!(push_axis(dx, dy), expected);
    }

    #[test]
    fn leaves_satisfied_pairs_alone() {
        // Overlapping on y but clear on x: one clear axis is enough.
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(6, 1, 4, 4);
        assert_eq!(push_apart(a, b, 2), None);
    }

    #[test]
    fn pushes_along_the_larger_delta() {
        let a = Rect::new(0, 0, 4, 4);
        let b = Rect::new(3, 1, 4, 4);
        // dx = 3, needed = 4 + 2 = 6, shift = floor(3 / 2) + 1 = 2
        let (a2, b2) = push_apart(a, b, 2).expect("pushed");
        assert_eq!(a2, Rect::new(-2, 0, 4, 4));
        assert_eq!(b2, Rect::new(5, 1, 4, 4));
        assert!(a2.is_separated_from(&b2, 2));
    }

    #[test]
    fn pushes_in_the_negative_direction_when_second_room_is_above() {
        let a = Rect::new(0, 5, 4, 4);
        let b = Rect::new(1, 2, 4, 4);
        let (a2, b2) = push_apart(a, b, 2).expect("pushed");
        assert!(a2.y > a.y);
        assert!(b2.y < b.y);
        assert_eq!(a2.x, a.x);
    }

    #[test]
    fn identical_centers_split_horizontally() {
        let a = Rect::new(2, 2, 4, 4);
        let (a2, b2) = push_apart(a, a, 2).expect("pushed");
        assert!(a2.x < b2.x);
        assert_eq!(a2.y, b2.y);
        assert!(a2.is_separated_from(&b2, 2));
    }

    #[test]
    fn pass_does_not_mutate_its_snapshot() {
        let snapshot = vec![(rid(0), Rect::new(0, 0, 4, 4)), (rid(1), Rect::new(1, 1, 4, 4))];
        let copy = snapshot.clone();
        let outcome = resolve_pass(&snapshot, 2);
        assert_eq!(snapshot, copy);
        assert_eq!(outcome.moves, 1);
    }

    #[test]
    fn converges_for_a_stack_of_identical_rooms() {
        let rects = (0..5).map(|i| (rid(i), Rect::new(0, 0, 4, 4))).collect::<Vec<_>>();
        let (resolved, passes, converged) = OverlapResolver::new(2).resolve_rects(rects);
        assert!(converged, "did not converge within {passes} passes");
        assert!(all_pairs_separated(&resolved, 2));
    }

    #[test]
    fn zero_budget_returns_input_unconverged() {
        let rects = vec![(rid(0), Rect::new(0, 0, 4, 4)), (rid(1), Rect::new(0, 0, 4, 4))];
        let (resolved, passes, converged) =
            OverlapResolver::new(2).with_max_passes(0).resolve_rects(rects.clone());
        assert_eq!(resolved, rects);
        assert_eq!(passes, 0);
        assert!(!converged);
    }

    #[test]
    fn resolve_normalizes_to_origin() {
        let topology = fixtures::two_rooms();
        let placement = [(rid(0), GridPoint::new(5, 5)), (rid(1), GridPoint::new(6, 6))]
            .into_iter()
            .collect::<Placement>();
        let resolution = OverlapResolver::new(2).resolve(&topology, &placement);

        assert!(resolution.converged);
        let positions = resolution.placement.positions();
        assert_eq!(positions.values().map(|p| p.x()).min(), Some(0));
        assert_eq!(positions.values().map(|p| p.y()).min(), Some(0));
        assert!(all_pairs_separated(&resolution.placement.rects(&topology), 2));
    }
}
