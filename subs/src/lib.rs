pub mod clock;

pub mod dtos {
    pub mod sub;
}

pub mod services {
    pub mod cast;
    pub mod renewal;
    pub mod sub;
    pub mod validate;
}

pub use clock::{Clock, FixedClock, SystemClock};
pub use services::sub::SubscriptionService;
