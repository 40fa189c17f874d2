//! Wire types for the admin API
//!
//! Field names are camelCase on the wire. Every entity comes with a `New*`
//! payload for creation and a `*Patch` payload for partial updates, in which
//! `None` fields are left out of the request body.

mod category;
mod favorite;
mod location;
mod user;
mod vehicle;

pub use category::{Category, CategoryPatch, NewCategory};
pub use favorite::{Favorite, NewFavorite};
pub use location::{LocationPatch, NewTransportLocation, TransportLocation};
pub use user::{NewUser, User, UserPatch};
pub use vehicle::{NewVehicle, Vehicle, VehiclePatch};

/// Identifier of an entity.
pub type Id = i64;
