//! The line extractor (§4.2): walks whole lines from a starting position,
//! bounded by `count` and filtered by a predicate.

use crate::buffer::GapBuffer;
use crate::extract::{Direction, Subject};
use crate::index::GrpmIdx;

/// Collects up to `count` lines starting at the line containing grapheme
/// index `start`, walking in `direction`, keeping only lines for which
/// `predicate` returns `true`.
///
/// Lines that fail the predicate are skipped but do not count against
/// `count`; only accepted lines do. Returned in text order regardless of
/// `direction`.
pub fn lines<P>(
    buffer: &GapBuffer,
    start: GrpmIdx,
    direction: Direction,
    count: usize,
    predicate: P,
) -> Vec<Subject>
where
    P: Fn(&Subject) -> bool,
{
    if count == 0 {
        return Vec::new();
    }

    let cp = buffer.grpm_idx_to_cp_pos(start);
    let start_line = buffer.line_num_at_pos(cp);
    let total_lines = buffer.num_lines();

    let mut accepted = Vec::with_capacity(count);
    match direction {
        Direction::Front => {
            let mut line_no = start_line;
            while line_no <= total_lines && accepted.len() < count {
                if let Some(subject) = buffer.line_subject(line_no) {
                    if predicate(&subject) {
                        accepted.push(subject);
                    }
                }
                line_no += 1;
            }
        }
        Direction::Back => {
            let mut line_no = start_line;
            let mut collected = Vec::with_capacity(count);
            loop {
                if let Some(subject) = buffer.line_subject(line_no) {
                    if predicate(&subject) {
                        collected.push(subject);
                    }
                }
                if line_no == 1 || collected.len() >= count {
                    break;
                }
                line_no -= 1;
            }
            collected.reverse();
            accepted = collected;
        }
    }

    accepted
}
