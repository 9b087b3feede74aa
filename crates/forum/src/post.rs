use serde::{Deserialize, Serialize};

use vetforum_core::{CategoryId, PostId};

/// One row of the forum listing.
///
/// The listing endpoint may or may not include the post id depending on the
/// server version, so it is optional here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostSummary {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<PostId>,
    #[serde(rename = "pergunta")]
    pub question: String,
    #[serde(rename = "categoriaforumid")]
    pub category_id: CategoryId,
}

/// A post with its current answer and category name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(rename = "pergunta")]
    pub question: String,
    /// Absent until someone answers.
    #[serde(rename = "resposta", default)]
    pub answer: Option<String>,
    #[serde(rename = "nomecategoria")]
    pub category_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn listing_rows_decode_from_server_shape() {
        let rows: Vec<PostSummary> = serde_json::from_value(json!([
            { "pergunta": "Is chocolate toxic for dogs?", "categoriaforumid": 3 },
            { "id": 12, "pergunta": "Vaccination schedule?", "categoriaforumid": "a1" },
        ]))
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].question, "Is chocolate toxic for dogs?");
        assert_eq!(rows[0].category_id, CategoryId::from(3));
        assert_eq!(rows[0].id, None);
        assert_eq!(rows[1].id, Some(PostId::from(12)));
    }

    #[test]
    fn detail_tolerates_missing_answer() {
        let detail: PostDetail = serde_json::from_value(json!({
            "pergunta": "Is chocolate toxic for dogs?",
            "nomecategoria": "Nutrition",
        }))
        .unwrap();
        assert_eq!(detail.answer, None);
        assert_eq!(detail.category_name, "Nutrition");

        let detail: PostDetail = serde_json::from_value(json!({
            "pergunta": "q",
            "resposta": "Yes, keep it away.",
            "nomecategoria": "Nutrition",
        }))
        .unwrap();
        assert_eq!(detail.answer.as_deref(), Some("Yes, keep it away."));
    }
}
