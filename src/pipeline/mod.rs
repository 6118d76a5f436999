// Pipelines that drive the gate over more than one pair.

pub mod batch;
