mod error;
mod execution;
mod format;
mod lookup;
mod object;
mod primitives;

pub use error::{Error, Result};
pub use execution::Evaluation;
pub use lookup::{LookupResult, Selector};
pub use object::{Object, ObjectCreateInfo, ObjectId, SlotTable, slots};
pub use primitives::{
    HostValue, PARAMETER_SLOT, PrimitiveFunction, PrimitiveValue, parameter,
};
