//! Domain model.
//!
//! Plain data types shared by the stores and services. The enrollment owns
//! its schedules outright; salary slips are derived data kept in sync by the
//! payroll reconciler and are never the source of truth.

mod enrollment;
mod package;
mod salary_slip;
mod user;

pub use enrollment::{
    AttendanceStatus, DatePeriod, Enrollment, PaymentStatus, Schedule,
};
pub use package::Package;
pub use salary_slip::{SalaryDetail, SalarySlip};
pub use user::{Role, User};
