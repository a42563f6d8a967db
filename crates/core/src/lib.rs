//! `hrdesk-core`: shared domain primitives for the HR client.
//!
//! Pure types only: identifiers, the domain error model and the statutory
//! professional-tax table. No IO lives here.

pub mod error;
pub mod id;
pub mod tax;

pub use error::{DomainError, DomainResult};
pub use id::{LeaveRequestId, LovId, SalaryStructureId, ShiftId, TrainingId, UserId};
pub use tax::{ProfessionalTax, TaxSlab, TaxTerm};
