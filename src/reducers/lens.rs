//! Getter/wither pairs locating a feature inside its parent state.

use std::sync::Arc;

/// Locates a feature `F` inside a parent `P` and rebuilds the parent around
/// a replacement feature.
///
/// `set` must return a copy of `parent` where only the lensed field differs.
pub trait FeatureLens<P, F>: Send + Sync + 'static {
    /// The feature, or `None` when an optional feature is absent.
    fn get<'a>(&self, parent: &'a P) -> Option<&'a Arc<F>>;

    fn set(&self, parent: &P, feature: Arc<F>) -> P;
}

/// Lens over a feature that is always present.
pub struct Lens<P, F> {
    get: fn(&P) -> &Arc<F>,
    set: fn(&P, Arc<F>) -> P,
}

impl<P, F> Lens<P, F> {
    pub const fn new(get: fn(&P) -> &Arc<F>, set: fn(&P, Arc<F>) -> P) -> Self {
        Self { get, set }
    }
}

impl<P, F> Clone for Lens<P, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, F> Copy for Lens<P, F> {}

impl<P: 'static, F: 'static> FeatureLens<P, F> for Lens<P, F> {
    fn get<'a>(&self, parent: &'a P) -> Option<&'a Arc<F>> {
        Some((self.get)(parent))
    }

    fn set(&self, parent: &P, feature: Arc<F>) -> P {
        (self.set)(parent, feature)
    }
}

/// Lens over a feature stored as `Option<Arc<F>>`.
///
/// Reducers lifted through it skip the action entirely while the feature is
/// absent.
pub struct OptionalLens<P, F> {
    get: fn(&P) -> Option<&Arc<F>>,
    set: fn(&P, Arc<F>) -> P,
}

impl<P, F> OptionalLens<P, F> {
    pub const fn new(get: fn(&P) -> Option<&Arc<F>>, set: fn(&P, Arc<F>) -> P) -> Self {
        Self { get, set }
    }
}

impl<P, F> Clone for OptionalLens<P, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<P, F> Copy for OptionalLens<P, F> {}

impl<P: 'static, F: 'static> FeatureLens<P, F> for OptionalLens<P, F> {
    fn get<'a>(&self, parent: &'a P) -> Option<&'a Arc<F>> {
        (self.get)(parent)
    }

    fn set(&self, parent: &P, feature: Arc<F>) -> P {
        (self.set)(parent, feature)
    }
}

/// Build a [`Lens`] for an `Arc<F>` field of a `Clone` parent struct.
///
/// ```
/// use std::sync::Arc;
/// use unistore::field_lens;
///
/// #[derive(Clone, Default)]
/// struct Board {
///     cells: Vec<u8>,
/// }
///
/// #[derive(Clone, Default)]
/// struct Game {
///     board: Arc<Board>,
///     turn: u32,
/// }
///
/// let lens = field_lens!(Game, board);
/// let game = Game::default();
/// let next = unistore::reducers::FeatureLens::set(&lens, &game, Arc::new(Board { cells: vec![1] }));
/// assert_eq!(next.board.cells, vec![1]);
/// assert!(game.board.cells.is_empty());
/// ```
#[macro_export]
macro_rules! field_lens {
    ($parent:ty, $field:ident) => {
        $crate::reducers::Lens::<$parent, _>::new(
            |parent: &$parent| &parent.$field,
            |parent: &$parent, feature| {
                $crate::equality::copy_with(parent, move |copy: &mut $parent| {
                    copy.$field = feature
                })
            },
        )
    };
}

/// Build an [`OptionalLens`] for an `Option<Arc<F>>` field.
#[macro_export]
macro_rules! optional_field_lens {
    ($parent:ty, $field:ident) => {
        $crate::reducers::OptionalLens::<$parent, _>::new(
            |parent: &$parent| parent.$field.as_ref(),
            |parent: &$parent, feature| {
                $crate::equality::copy_with(parent, move |copy: &mut $parent| {
                    copy.$field = Some(feature)
                })
            },
        )
    };
}
