//! Academic core for the examination cell portal
//!
//! This crate holds the pieces of the portal that carry actual rules rather
//! than page glue: the grade-point scale, SGPA/CGPA aggregation, the closed
//! role enumeration, the session model and the gate that decides whether a
//! protected view renders or redirects.
//!
//! Nothing in here performs network or database I/O. Persistence of the
//! session slot goes through the [`provider::SessionStore`] trait, which the
//! services implement on top of Redis.
//!
//! ```rust
//! use academics::{GradeAggregator, Grade, ResultRecord};
//!
//! let records = vec![
//!     ResultRecord::new("CS101", "Programming", 4, 1, Some(Grade::A)),
//!     ResultRecord::new("MA101", "Calculus", 4, 1, Some(Grade::B)),
//! ];
//! let transcript = GradeAggregator::default().aggregate(&records);
//! assert_eq!(transcript.cgpa, 8.0);
//! ```

pub mod aggregate;
pub mod error;
pub mod gate;
pub mod grade;
pub mod provider;
pub mod record;
pub mod role;
pub mod session;
pub mod standing;

pub use aggregate::{GradeAggregator, RoundingPolicy, SemesterAggregate, Transcript};
pub use error::{GradeError, ProviderError, RoleError, SessionError, StoreError};
pub use gate::{GateDecision, Navigator, RedirectTarget, SessionGate};
pub use grade::Grade;
pub use provider::{MemorySessionStore, SessionProvider, SessionState, SessionStore};
pub use record::ResultRecord;
pub use role::Role;
pub use session::{Principal, Session};
pub use standing::Standing;
