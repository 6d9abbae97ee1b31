//! Keyword-based reply selection
//!
//! The assistant has no model behind it: a user utterance is classified into
//! one of four intents by case-insensitive substring tests, checked in a fixed
//! order, and each intent maps to one canned reply.

const DEPLOYMENT_KEYWORDS: &[&str] = &["deploy", "create"];
const COST_KEYWORDS: &[&str] = &["cost", "price"];
const IAC_KEYWORDS: &[&str] = &["terraform", "iac"];

const DEPLOYMENT_REPLY: &str = "I can help you deploy a new cloud infrastructure. Based on your requirements, I recommend using AWS EC2 for compute, RDS for database, and S3 for storage. Would you like me to generate a deployment plan?";
const COST_REPLY: &str = "Based on your current infrastructure, I estimate the monthly cost to be around $2,350. I've identified potential savings of up to $320 by right-sizing your EC2 instances and optimizing storage usage. Would you like to see a detailed cost breakdown?";
const IAC_REPLY: &str = "I can generate Terraform code for your infrastructure. This will include modules for compute, networking, storage, and security. Would you like me to create a basic template or a more detailed configuration?";
const CLARIFICATION_REPLY: &str = "I understand you're interested in cloud automation. Could you provide more details about your specific requirements? For example, what kind of resources do you need, and what are your performance and cost constraints?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Deployment,
    CostEstimate,
    InfrastructureAsCode,
    Clarification,
}

impl Intent {
    /// First matching rule wins, so "deploy and reduce cost" is a deployment.
    pub fn classify(utterance: &str) -> Self {
        let lowered = utterance.to_lowercase();
        let mentions = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

        if mentions(DEPLOYMENT_KEYWORDS) {
            Intent::Deployment
        } else if mentions(COST_KEYWORDS) {
            Intent::CostEstimate
        } else if mentions(IAC_KEYWORDS) {
            Intent::InfrastructureAsCode
        } else {
            Intent::Clarification
        }
    }

    pub fn reply(&self) -> &'static str {
        match self {
            Intent::Deployment => DEPLOYMENT_REPLY,
            Intent::CostEstimate => COST_REPLY,
            Intent::InfrastructureAsCode => IAC_REPLY,
            Intent::Clarification => CLARIFICATION_REPLY,
        }
    }
}

pub fn select_reply(utterance: &str) -> &'static str {
    Intent::classify(utterance).reply()
}
