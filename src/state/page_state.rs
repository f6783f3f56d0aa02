/// Listing page outcomes and the traversal termination decision
///
/// The orchestrator classifies every listing page it visits into a
/// [`PageOutcome`] and asks a [`TerminationPolicy`] whether to keep going.
/// Nothing else in the crawl decides when traversal ends.
use std::fmt;

/// What a single listing page produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Page was fetched and yielded this many item stubs (always > 0)
    Harvested(usize),

    /// Page was fetched but contained no item blocks
    Empty,

    /// Page could not be fetched (transport error or non-success status)
    FetchFailed,
}

impl PageOutcome {
    /// Classifies a fetched page by its stub count
    pub fn from_stub_count(count: usize) -> Self {
        if count == 0 {
            Self::Empty
        } else {
            Self::Harvested(count)
        }
    }

    /// Returns true if the page contributed items
    pub fn is_harvested(&self) -> bool {
        matches!(self, Self::Harvested(_))
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Harvested(n) => write!(f, "harvested {} items", n),
            Self::Empty => write!(f, "empty"),
            Self::FetchFailed => write!(f, "fetch failed"),
        }
    }
}

/// Why a traversal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// Every page up to the configured bound was visited
    BoundReached,

    /// The given page parsed to zero items
    EmptyPage(u32),

    /// The given page failed to fetch and the policy treats that as the end
    FetchFailed(u32),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundReached => write!(f, "page bound reached"),
            Self::EmptyPage(page) => write!(f, "no items found on page {}", page),
            Self::FetchFailed(page) => write!(f, "page {} could not be fetched", page),
        }
    }
}

/// Decides whether a listing page ends the traversal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationPolicy {
    /// Treat an unfetchable page like an empty one
    pub stop_on_fetch_failure: bool,
}

impl Default for TerminationPolicy {
    fn default() -> Self {
        Self {
            stop_on_fetch_failure: true,
        }
    }
}

impl TerminationPolicy {
    pub fn new(stop_on_fetch_failure: bool) -> Self {
        Self {
            stop_on_fetch_failure,
        }
    }

    /// Returns the reason to stop after `page`, or None to continue
    pub fn should_stop(&self, page: u32, outcome: PageOutcome) -> Option<StopReason> {
        match outcome {
            PageOutcome::Harvested(_) => None,
            PageOutcome::Empty => Some(StopReason::EmptyPage(page)),
            PageOutcome::FetchFailed if self.stop_on_fetch_failure => {
                Some(StopReason::FetchFailed(page))
            }
            PageOutcome::FetchFailed => None,
        }
    }
}
