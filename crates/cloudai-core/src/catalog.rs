//! Static picklists shown next to the chat and the notifications they raise.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryIcon {
    Cloud,
    Database,
    Code,
    Server,
}

impl QueryIcon {
    pub fn glyph(&self) -> &'static str {
        match self {
            QueryIcon::Cloud => "☁",
            QueryIcon::Database => "⛁",
            QueryIcon::Code => "⌨",
            QueryIcon::Server => "▤",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuggestedQuery {
    pub text: &'static str,
    pub icon: QueryIcon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub services: &'static str,
}

pub const SUGGESTED_QUERIES: [SuggestedQuery; 4] = [
    SuggestedQuery {
        text: "Deploy a new web application",
        icon: QueryIcon::Cloud,
    },
    SuggestedQuery {
        text: "Optimize my current infrastructure for cost",
        icon: QueryIcon::Database,
    },
    SuggestedQuery {
        text: "Generate Terraform code for my infrastructure",
        icon: QueryIcon::Code,
    },
    SuggestedQuery {
        text: "Scale my database cluster",
        icon: QueryIcon::Server,
    },
];

pub const TEMPLATES: [Template; 3] = [
    Template {
        name: "Web Application Stack",
        services: "EC2, RDS, S3, CloudFront",
    },
    Template {
        name: "Serverless API",
        services: "Lambda, API Gateway, DynamoDB",
    },
    Template {
        name: "Data Processing Pipeline",
        services: "S3, Lambda, SQS, Kinesis",
    },
];

/// A transient, non-persistent message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    pub fn suggestion_selected(query: &SuggestedQuery) -> Self {
        Self::new("Suggestion selected", format!("\"{}\" added to input", query.text))
    }

    pub fn template_selected(template: &Template) -> Self {
        Self::new(
            "Template selected",
            format!("{} template will be used for your deployment", template.name),
        )
    }

    pub fn history_requested() -> Self {
        Self::new("Chat history", "Viewing your previous conversations")
    }

    pub fn theme_changed(theme: crate::theme::Theme) -> Self {
        Self::new("Theme changed", format!("Switched to {}", theme.display_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Theme;

    #[test]
    fn test_suggested_queries_in_display_order() {
        let texts: Vec<&str> = SUGGESTED_QUERIES.iter().map(|q| q.text).collect();
        assert_eq!(
            texts,
            vec![
                "Deploy a new web application",
                "Optimize my current infrastructure for cost",
                "Generate Terraform code for my infrastructure",
                "Scale my database cluster",
            ]
        );
        assert_eq!(SUGGESTED_QUERIES[2].icon, QueryIcon::Code);
    }

    #[test]
    fn test_template_subtitles() {
        assert_eq!(TEMPLATES.len(), 3);
        assert_eq!(TEMPLATES[1].name, "Serverless API");
        assert_eq!(TEMPLATES[1].services, "Lambda, API Gateway, DynamoDB");
    }

    #[test]
    fn test_notification_text() {
        let n = Notification::suggestion_selected(&SUGGESTED_QUERIES[3]);
        assert_eq!(n.title, "Suggestion selected");
        assert_eq!(n.description, "\"Scale my database cluster\" added to input");

        let n = Notification::template_selected(&TEMPLATES[2]);
        assert_eq!(n.title, "Template selected");
        assert_eq!(
            n.description,
            "Data Processing Pipeline template will be used for your deployment"
        );

        let n = Notification::theme_changed(Theme::Light);
        assert_eq!(n.description, "Switched to Light mode");
    }
}
