use std::any::TypeId;
use std::collections::HashMap;

use xias::Xias;

use crate::comp::{Comp, KindId};
use crate::storage::AnyStorage;

struct Entry {
    name:    &'static str,
    storage: Box<dyn AnyStorage>,
}

/// Assigns kind ids and owns one storage per kind.
#[derive(Default)]
pub(crate) struct Registry {
    ids:     HashMap<TypeId, KindId>,
    entries: Vec<Entry>,
}

impl Registry {
    /// Registers `C` if it is not registered yet, returning its kind id.
    pub(crate) fn register<C: Comp>(&mut self) -> KindId {
        if let Some(&kind) = self.ids.get(&TypeId::of::<C>()) {
            return kind;
        }

        assert!(
            self.entries.len() < usize::from(u16::MAX),
            "Cannot register {}: too many component kinds",
            C::name(),
        );
        let kind = KindId(self.entries.len().small_int());
        self.entries.push(Entry { name: C::name(), storage: Box::<C::Storage>::default() });
        self.ids.insert(TypeId::of::<C>(), kind);
        log::debug!("Registered component kind {} as {}", C::name(), kind);
        kind
    }

    pub(crate) fn get<C: Comp>(&self) -> Option<KindId> {
        self.ids.get(&TypeId::of::<C>()).copied()
    }

    fn entry(&self, kind: KindId) -> &Entry {
        match self.entries.get(kind.usize()) {
            Some(entry) => entry,
            None => panic!("Kind {kind} is not registered in this world"),
        }
    }

    fn entry_mut(&mut self, kind: KindId) -> &mut Entry {
        match self.entries.get_mut(kind.usize()) {
            Some(entry) => entry,
            None => panic!("Kind {kind} is not registered in this world"),
        }
    }

    pub(crate) fn name(&self, kind: KindId) -> &'static str { self.entry(kind).name }

    pub(crate) fn any(&self, kind: KindId) -> &dyn AnyStorage { &*self.entry(kind).storage }

    pub(crate) fn any_mut(&mut self, kind: KindId) -> &mut dyn AnyStorage {
        &mut *self.entry_mut(kind).storage
    }

    pub(crate) fn storage<C: Comp>(&self) -> Option<&C::Storage> {
        let kind = self.get::<C>()?;
        let storage = self.any(kind).as_any().downcast_ref::<C::Storage>();
        Some(storage.expect("TypeId mismatch"))
    }

    pub(crate) fn storage_mut<C: Comp>(&mut self) -> Option<&mut C::Storage> {
        let kind = self.get::<C>()?;
        let storage = self.any_mut(kind).as_any_mut().downcast_mut::<C::Storage>();
        Some(storage.expect("TypeId mismatch"))
    }

    /// The number of registered kinds.
    pub(crate) fn len(&self) -> usize { self.entries.len() }
}
