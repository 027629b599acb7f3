// Instrumentation side: the collaborators that produce the metric logs the
// pipeline consumes. The pipeline itself never calls into this module.
pub mod cast_submitter;
pub mod interface;
pub mod recorder;
pub mod uploader;
