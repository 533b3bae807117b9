/// What a list view should show, driven only by fetch lifecycle events.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ViewState {
    /// Nothing has been committed yet.
    #[default]
    InitialLoading,
    Loaded(LoadedPhase),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadedPhase {
    Idle,
    /// A follow-up fetch is in flight; the previous rows stay on screen.
    Transitioning,
    /// The committed result set has no rows.
    Empty,
}

impl ViewState {
    pub fn fetch_started(self) -> Self {
        match self {
            Self::InitialLoading => Self::InitialLoading,
            Self::Loaded(_) => Self::Loaded(LoadedPhase::Transitioning),
        }
    }

    pub fn fetch_committed(self, item_count: usize) -> Self {
        Self::Loaded(Self::settled_phase(item_count))
    }

    /// The current fetch failed; `item_count` is what is still displayed.
    pub fn fetch_failed(self, item_count: usize) -> Self {
        match self {
            Self::InitialLoading => Self::Loaded(LoadedPhase::Empty),
            Self::Loaded(LoadedPhase::Transitioning) => {
                Self::Loaded(Self::settled_phase(item_count))
            }
            loaded => loaded,
        }
    }

    fn settled_phase(item_count: usize) -> LoadedPhase {
        if item_count == 0 {
            LoadedPhase::Empty
        } else {
            LoadedPhase::Idle
        }
    }

    pub fn is_loaded(self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    pub fn is_transitioning(self) -> bool {
        matches!(self, Self::Loaded(LoadedPhase::Transitioning))
    }

    /// Only a settled empty result shows the empty state.
    pub fn shows_empty(self) -> bool {
        matches!(self, Self::Loaded(LoadedPhase::Empty))
    }
}
