//! Prompt assembly for the two model-backed steps.

use crate::llm::CompletionRequest;

use super::models::{HookInputs, MAX_HOOKS, PostInputs};

/// Sampling temperature for hook generation.
pub const HOOK_TEMPERATURE: f32 = 0.8;

/// Sampling temperature for the final post.
pub const POST_TEMPERATURE: f32 = 0.7;

/// Ask for five bullet-point hooks.
pub fn hooks_request(inputs: &HookInputs) -> CompletionRequest {
    let prompt = format!(
        "You are a marketing copy expert for {platform}. Generate {count} creative, engaging, \
         and product-specific hook lines for the product '{product}'.\n\
         These hooks should align with the following content style: {style} and appeal to a \
         professional audience.\n\
         Output only the list of {count} hooks as bullet points.",
        platform = inputs.platform.display_name(),
        count = MAX_HOOKS,
        product = inputs.product_name,
        style = inputs.template.description,
    );
    CompletionRequest::new(prompt, HOOK_TEMPERATURE)
}

/// Ask for one finished post built around the selected hook.
pub fn post_request(inputs: &PostInputs) -> CompletionRequest {
    let prompt = format!(
        "You are a marketing assistant. Using the following hook: \"{hook}\", write a {platform} \
         post for the product \"{product}\".\n\
         Follow this style: {style}. The post should be compelling, clearly tailored to the \
         product's use case, and fit well on {platform}.\n\
         Do not use generic placeholders; make it sound specific to {product}'s real-world \
         benefits.",
        hook = inputs.hook,
        platform = inputs.platform.display_name(),
        product = inputs.product_name,
        style = inputs.template.description,
    );
    CompletionRequest::new(prompt, POST_TEMPERATURE)
}
