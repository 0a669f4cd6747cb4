use serde_json::{json, Value};

/// The keyword-exact and analyzed-text mapping contract for the company
/// profile index, with a lowercase+ASCII-folding analyzer for name fields.
pub fn default_schema() -> Value {
    json!({
        "mappings": {
            "properties": {
                "company_id": { "type": "keyword" },
                "website": { "type": "keyword" },
                "domain": { "type": "keyword" },
                "company_commercial_name": {
                    "type": "text",
                    "analyzer": "company_name_analyzer",
                    "fields": { "keyword": { "type": "keyword" } }
                },
                "company_legal_name": {
                    "type": "text",
                    "analyzer": "company_name_analyzer",
                    "fields": { "keyword": { "type": "keyword" } }
                },
                "company_all_names": {
                    "type": "text",
                    "analyzer": "company_name_analyzer",
                    "fields": { "keyword": { "type": "keyword" } }
                },
                "phones": { "type": "keyword" },
                "phones_normalized": { "type": "keyword" },
                "addresses": { "type": "text" },
                "facebook_links": { "type": "keyword" },
                "facebook_links_normalized": { "type": "keyword" },
                "twitter_links": { "type": "keyword" },
                "instagram_links": { "type": "keyword" },
                "linkedin_links": { "type": "keyword" },
                "youtube_links": { "type": "keyword" },
                "status": { "type": "keyword" }
            }
        },
        "settings": {
            "analysis": {
                "analyzer": {
                    "company_name_analyzer": {
                        "type": "custom",
                        "tokenizer": "standard",
                        "filter": ["lowercase", "asciifolding"]
                    }
                }
            }
        }
    })
}
