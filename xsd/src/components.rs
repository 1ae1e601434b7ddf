use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;
use std::num::{NonZeroU32, NonZeroUsize};

/// Trait implemented by all model components stored in an [`Arena`].
pub trait Component {
    const DISPLAY_NAME: &'static str;
}

/// A non-owning reference to a [`Component`] stored in an [`Arena`].
///
/// Children use these to point back at their owner (element → schema, attribute → element)
/// without creating an ownership cycle.
pub struct Ref<R: Component>(NonZeroU32, PhantomData<R>);

impl<R: Component> Ref<R> {
    fn from_index(index: usize) -> Self {
        let inner = u32::try_from(index + 1)
            .ok()
            .and_then(NonZeroU32::new)
            .expect("Component arena exceeded u32::MAX entries");
        Self(inner, PhantomData)
    }

    fn index(self) -> usize {
        let size: NonZeroUsize = self
            .0
            .try_into()
            .expect("Could not convert component reference to usize index");
        usize::from(size) - 1
    }

    pub fn get(self, table: &impl ComponentTable<R>) -> &R {
        table.get(self)
    }
}

/// Anything that can resolve a [`Ref`] to its component.
pub trait ComponentTable<R: Component> {
    fn get(&self, ref_: Ref<R>) -> &R;
}

// derive(...) does not work if R itself does not derive the trait, even though it is only "used"
// in the PhantomData; hence we have to manually implement required traits for the Ref type.

impl<R: Component> Copy for Ref<R> {}

impl<R: Component> Clone for Ref<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: Component> fmt::Debug for Ref<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<{} #{}>", R::DISPLAY_NAME, self.0)
    }
}

impl<R: Component> PartialEq for Ref<R> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: Component> Eq for Ref<R> {}

impl<R: Component> Hash for Ref<R> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

/// Append-only storage for one kind of component. Entries are never removed, so a [`Ref`] stays
/// valid for the lifetime of the arena that issued it.
pub struct Arena<R: Component> {
    entries: Vec<R>,
}

impl<R: Component> Arena<R> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn create(&mut self, component: R) -> Ref<R> {
        let ref_ = Ref::from_index(self.entries.len());
        self.entries.push(component);
        ref_
    }

    pub fn get(&self, ref_: Ref<R>) -> &R {
        &self.entries[ref_.index()]
    }

    pub fn get_mut(&mut self, ref_: Ref<R>) -> &mut R {
        &mut self.entries[ref_.index()]
    }
}

impl<R: Component> ComponentTable<R> for Arena<R> {
    fn get(&self, ref_: Ref<R>) -> &R {
        Arena::get(self, ref_)
    }
}

impl<R: Component> Default for Arena<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Component + fmt::Debug> fmt::Debug for Arena<R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(&self.entries).finish()
    }
}
