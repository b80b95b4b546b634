use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use parking_lot::RwLock;

use crate::{Error, PrimitiveFunction, PrimitiveValue, Result};

static NEXT_OBJECT_ID: AtomicU64 = AtomicU64::new(0);

/// Identity of an object.
///
/// Assigned once when the object is created (or copied) and never reused,
/// so two objects with identical contents still have distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(u64);

impl ObjectId {
    fn next() -> Self {
        Self(NEXT_OBJECT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(self) -> u64 {
        self.0
    }
}

pub type SlotTable = BTreeMap<Arc<str>, Object>;

#[derive(Debug, Default, Clone)]
pub struct ObjectCreateInfo {
    pub slots: SlotTable,
    pub parent_slots: Vec<Object>,
    pub messages: Vec<Arc<str>>,
    pub primitive_value: Option<PrimitiveValue>,
    pub primitive_function: Option<PrimitiveFunction>,
}

#[derive(Debug, Clone)]
pub(crate) struct ObjectData {
    pub slots: SlotTable,
    pub parent_slots: Vec<Object>,
    pub messages: Vec<Arc<str>>,
    pub primitive_value: Option<PrimitiveValue>,
    pub primitive_function: Option<PrimitiveFunction>,
}

pub(crate) struct ObjectInner {
    pub id: ObjectId,
    pub data: RwLock<ObjectData>,
}

/// Shared handle to an object.
///
/// Cloning the handle does not copy the object: every clone observes the
/// same slots. Use [`Object::copy`] for a new object.
#[derive(Clone)]
pub struct Object(pub(crate) Arc<ObjectInner>);

impl Object {
    pub fn new(info: ObjectCreateInfo) -> Self {
        let ObjectCreateInfo {
            slots,
            parent_slots,
            messages,
            primitive_value,
            primitive_function,
        } = info;

        Self::from_data(ObjectData {
            slots,
            parent_slots,
            messages,
            primitive_value,
            primitive_function,
        })
    }

    fn from_data(data: ObjectData) -> Self {
        let id = ObjectId::next();
        log::trace!("created object #{}", id.0);
        Self(Arc::new(ObjectInner {
            id,
            data: RwLock::new(data),
        }))
    }

    pub fn empty() -> Self {
        Self::new(ObjectCreateInfo::default())
    }

    pub fn with_value(value: impl Into<PrimitiveValue>) -> Self {
        Self::new(ObjectCreateInfo {
            primitive_value: Some(value.into()),
            ..Default::default()
        })
    }

    pub fn with_function<F>(function: F) -> Self
    where
        F: Fn(Object) -> Result<Object> + Send + Sync + 'static,
    {
        Self::new(ObjectCreateInfo {
            primitive_function: Some(PrimitiveFunction::new(function)),
            ..Default::default()
        })
    }

    /// Object that runs `messages` against a copy of itself when evaluated.
    pub fn with_messages<I, S>(messages: I, slots: SlotTable) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        Self::new(ObjectCreateInfo {
            slots,
            messages: messages.into_iter().map(Into::into).collect(),
            ..Default::default()
        })
    }

    #[inline]
    pub fn id(&self) -> ObjectId {
        self.0.id
    }

    #[inline]
    pub fn ptr_eq(&self, other: &Object) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    #[inline]
    pub(crate) fn data(&self) -> &RwLock<ObjectData> {
        &self.0.data
    }

    /// Shallow duplicate: fresh slot table, parent list and message list,
    /// but the referenced objects and the primitive payload are shared.
    pub fn copy(&self) -> Object {
        let data = self.data().read().clone();
        let copy = Self::from_data(data);
        log::trace!("copied object #{} to #{}", self.id().0, copy.id().0);
        copy
    }

    pub fn assign_slot(&self, name: impl Into<Arc<str>>, object: Object) {
        let name = name.into();
        log::trace!("#{}: assign slot '{}'", self.id().0, name);
        self.data().write().slots.insert(name, object);
    }

    /// Registers the object currently stored in slot `name` as a parent.
    /// The slot itself stays in place.
    pub fn make_parent(&self, name: &str) -> Result<()> {
        let mut data = self.data().write();
        let Some(parent) = data.slots.get(name).cloned() else {
            log::debug!(
                "#{}: cannot promote missing slot '{}'",
                self.id().0,
                name
            );
            return Err(Error::SlotNotFound(name.to_string()));
        };
        data.parent_slots.push(parent);
        Ok(())
    }

    pub fn assign_parent_slot(
        &self,
        name: impl Into<Arc<str>>,
        object: Object,
    ) -> Result<()> {
        let name = name.into();
        self.assign_slot(name.clone(), object);
        self.make_parent(&name)
    }

    /// Direct slot, parents are not consulted.
    pub fn slot(&self, name: &str) -> Option<Object> {
        self.data().read().slots.get(name).cloned()
    }

    pub fn slot_names(&self) -> Vec<Arc<str>> {
        self.data().read().slots.keys().cloned().collect()
    }

    pub fn parents(&self) -> Vec<Object> {
        self.data().read().parent_slots.clone()
    }

    pub fn messages(&self) -> Vec<Arc<str>> {
        self.data().read().messages.clone()
    }

    pub fn primitive_value(&self) -> Option<PrimitiveValue> {
        self.data().read().primitive_value.clone()
    }

    pub fn primitive_function(&self) -> Option<PrimitiveFunction> {
        self.data().read().primitive_function.clone()
    }

    pub fn has_primitive_function(&self) -> bool {
        self.data().read().primitive_function.is_some()
    }
}

impl Default for Object {
    fn default() -> Self {
        Self::empty()
    }
}

/// Builds a [`SlotTable`] from `(name, object)` pairs.
pub fn slots<I, S>(entries: I) -> SlotTable
where
    I: IntoIterator<Item = (S, Object)>,
    S: Into<Arc<str>>,
{
    entries
        .into_iter()
        .map(|(name, object)| (name.into(), object))
        .collect()
}
