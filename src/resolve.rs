//! Pagination resolution
//!
//! Index entries must carry the absolute page each paper's title page lands on
//! in the final document, but those offsets depend on how many pages the index
//! itself occupies — and that is only known after the index is rendered, since
//! long titles wrap and spill across pages. The resolver breaks the cycle by
//! rendering against an assumed count, measuring the real one, and re-rendering
//! with corrected offsets until the two agree (bounded, in case a correction
//! re-flows the index again).

use log::debug;

use crate::error::Result;

/// Upper bound on render rounds. In practice the first correction settles it;
/// the bound only exists to stop a pathological oscillation where changed page
/// numbers keep changing the index's own length.
const MAX_ROUNDS: usize = 4;

/// Page extent of one paper, in sort order.
#[derive(Debug, Clone)]
pub struct PaperSpan {
    pub title: String,
    pub title_pages: usize,
    pub content_pages: usize,
}

/// One line of the index: a title and the absolute 1-based page it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub title: String,
    pub target_page: usize,
}

/// Outcome of the fixed-point resolution.
///
/// `artifact` is whatever the render callback produced in the final round
/// (the rendered index file in the pipeline); `entries` are exactly the
/// entries that render used, and `index_pages` its measured page count.
pub struct ResolvedIndex<T> {
    pub artifact: T,
    pub entries: Vec<IndexEntry>,
    pub index_pages: usize,
    pub rounds: usize,
}

/// Compute target page numbers for a given index page count.
///
/// The first paper starts on the page right after the index; each subsequent
/// paper starts after the previous paper's title and content pages.
pub fn target_pages(papers: &[PaperSpan], index_pages: usize) -> Vec<IndexEntry> {
    let mut next_page = index_pages + 1;
    papers
        .iter()
        .map(|paper| {
            let entry = IndexEntry {
                title: paper.title.clone(),
                target_page: next_page,
            };
            next_page += paper.title_pages + paper.content_pages;
            entry
        })
        .collect()
}

/// Drive the estimate-measure-correct cycle to a fixed point.
///
/// `render` takes a candidate entry list and returns the rendered artifact
/// together with its true page count. Rendering is repeated with corrected
/// offsets until the measured count matches the count the entries assumed,
/// or [`MAX_ROUNDS`] is reached (in which case the last render wins — an
/// accepted approximation).
pub fn resolve_index<T, F>(
    papers: &[PaperSpan],
    seed_pages: usize,
    mut render: F,
) -> Result<ResolvedIndex<T>>
where
    F: FnMut(&[IndexEntry]) -> Result<(T, usize)>,
{
    let mut assumed = seed_pages.max(1);

    for round in 1..=MAX_ROUNDS {
        let entries = target_pages(papers, assumed);
        let (artifact, actual) = render(&entries)?;

        if actual == assumed || round == MAX_ROUNDS {
            if actual != assumed {
                debug!("index page count still moving after {round} rounds; accepting {actual}");
            }
            return Ok(ResolvedIndex {
                artifact,
                entries,
                index_pages: actual,
                rounds: round,
            });
        }

        debug!("index spans {actual} pages, assumed {assumed}; correcting offsets");
        assumed = actual;
    }

    unreachable!("resolution loop always returns within MAX_ROUNDS")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(title: &str, title_pages: usize, content_pages: usize) -> PaperSpan {
        PaperSpan {
            title: title.to_string(),
            title_pages,
            content_pages,
        }
    }

    #[test]
    fn test_target_pages_offsets() {
        let papers = vec![span("a", 1, 10), span("b", 1, 5), span("c", 1, 3)];
        let entries = target_pages(&papers, 2);

        let targets: Vec<usize> = entries.iter().map(|e| e.target_page).collect();
        assert_eq!(targets, vec![3, 14, 20]);
    }

    #[test]
    fn test_target_pages_zero_papers() {
        assert!(target_pages(&[], 1).is_empty());
    }

    #[test]
    fn test_target_pages_zero_content_paper_still_advances_title_page() {
        let papers = vec![span("unreadable", 1, 0), span("next", 1, 2)];
        let entries = target_pages(&papers, 1);
        assert_eq!(entries[0].target_page, 2);
        assert_eq!(entries[1].target_page, 3);
    }

    #[test]
    fn test_resolve_converges_immediately_when_seed_correct() {
        let papers = vec![span("a", 1, 4)];
        let resolved = resolve_index(&papers, 1, |entries| {
            assert_eq!(entries[0].target_page, 2);
            Ok(((), 1))
        })
        .unwrap();

        assert_eq!(resolved.rounds, 1);
        assert_eq!(resolved.index_pages, 1);
        assert_eq!(resolved.entries[0].target_page, 2);
    }

    #[test]
    fn test_resolve_performs_one_correction_round() {
        let papers = vec![span("a", 1, 4), span("b", 1, 2)];

        // The index actually needs 3 pages no matter what numbers it shows.
        let mut calls = 0;
        let resolved = resolve_index(&papers, 1, |_entries| {
            calls += 1;
            Ok(((), 3))
        })
        .unwrap();

        assert_eq!(calls, 2);
        assert_eq!(resolved.rounds, 2);
        assert_eq!(resolved.index_pages, 3);
        // Entries reflect the corrected offset, not the stale seed.
        let targets: Vec<usize> = resolved.entries.iter().map(|e| e.target_page).collect();
        assert_eq!(targets, vec![4, 9]);
    }

    #[test]
    fn test_resolve_oscillation_stops_at_bound() {
        let papers = vec![span("a", 1, 1)];

        // Render count flips between 1 and 2 forever.
        let mut flip = false;
        let resolved = resolve_index(&papers, 1, |_entries| {
            flip = !flip;
            Ok(((), if flip { 2 } else { 1 }))
        })
        .unwrap();

        assert_eq!(resolved.rounds, MAX_ROUNDS);
        // The entries returned are the ones the final render actually used,
        // computed against the previous round's measured count of 2.
        assert_eq!(resolved.entries[0].target_page, 3);
    }

    #[test]
    fn test_resolve_seed_of_zero_clamped_to_one() {
        let papers = vec![span("a", 1, 0)];
        let resolved = resolve_index(&papers, 0, |entries| {
            Ok((entries[0].target_page, 1))
        })
        .unwrap();
        assert_eq!(resolved.artifact, 2);
    }

    #[test]
    fn test_resolve_propagates_render_failure() {
        let papers = vec![span("a", 1, 0)];
        let result: Result<ResolvedIndex<()>> = resolve_index(&papers, 1, |_entries| {
            Err(crate::error::Error::General("render exploded".into()))
        });
        assert!(result.is_err());
    }
}
