//! Code generators consuming the output of a [`Transform`](crate::transform::Transform).

pub mod c;
