//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::batch::*;
#[doc(no_inline)]
pub use crate::cartoon::*;
#[doc(no_inline)]
pub use crate::experiment::*;
#[doc(no_inline)]
pub use crate::needle::*;
#[doc(no_inline)]
pub use crate::table::*;
#[doc(no_inline)]
pub use crate::traits::*;
#[doc(no_inline)]
pub use crate::trial::*;
