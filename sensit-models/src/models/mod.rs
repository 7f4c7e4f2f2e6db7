//! Entity model definitions.

pub mod sensor;
pub mod record;
pub mod measurement;
pub mod device;
pub mod criterion;
