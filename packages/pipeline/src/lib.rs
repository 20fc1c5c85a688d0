// Waypost content pipeline - batch blog drafting and enrichment core
//
// This crate drives one subsystem of the Waypost travel-blogging platform:
// turning a set of trips into drafted blog posts via an external completion
// batch service, then enriching each draft (images, maps, translation,
// narrative, ads, affiliate links) before it is persisted as a post.
//
// Trip CRUD, auth, feeds and rendering live elsewhere and are reached only
// through the collaborator traits in kernel/traits.rs.

pub mod affiliate;
pub mod config;
pub mod context;
pub mod domain;
pub mod enhancer;
pub mod feed_ads;
pub mod kernel;
pub mod request;
pub mod store;
pub mod usecases;

pub use config::*;
