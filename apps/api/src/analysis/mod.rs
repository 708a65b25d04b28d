// Resume / job description analysis.
// One multipart request in, three LLM texts out. All LLM calls go through llm_client.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod scratch;
