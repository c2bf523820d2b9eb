pub mod types;

pub use types::{
    race_key, Constructor, ConstructorStanding, Driver, DriverStanding, FromRecord, Race,
};
