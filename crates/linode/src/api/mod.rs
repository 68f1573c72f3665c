//! Typed endpoint methods, grouped by API area.

mod account;
mod compute;
mod databases;
mod domains;
mod lke;
mod longview;
mod networking;
mod object_storage;
mod reference;
mod stackscripts;
mod support;
mod volumes;
