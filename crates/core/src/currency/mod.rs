//! USD-based rate tables, cross rates and the rate source port.

pub mod conversion;
pub mod rates;
pub mod source;

pub use conversion::RateConverter;
pub use rates::{BASE_CURRENCY, RateTable};
#[cfg(any(test, feature = "test-utils"))]
pub use source::StaticRateSource;
pub use source::{RateSource, RateSourceError};
