//! The site-wide payload handed to every render call: the build time,
//! every post collected so far newest first, and the same posts grouped
//! by category label. A payload is a snapshot: it borrows the post list
//! as it stands and must be rebuilt before each render so accumulated
//! posts show up.

use crate::post::Post;
use chrono::{DateTime, Utc};
use gtmpl_value::Value;
use std::collections::HashMap;

/// A snapshot of site-wide template data.
pub struct Payload<'a> {
    /// The moment the payload was built.
    pub time: DateTime<Utc>,

    /// Every post, newest first. Posts sharing a date keep their order
    /// in the backing list.
    pub posts: Vec<&'a Post>,

    /// Posts grouped by category label, each group newest first. A post
    /// with several labels appears in each group; a post with none
    /// appears in no group.
    pub categories: HashMap<String, Vec<&'a Post>>,
}

impl<'a> Payload<'a> {
    /// Builds a payload over `posts`. The backing list's own order is
    /// left alone; the payload sorts its references.
    pub fn build(posts: &'a [Post]) -> Payload<'a> {
        let mut ordered: Vec<&Post> = posts.iter().collect();
        ordered.sort_by(|a, b| b.date.cmp(&a.date));

        let mut categories: HashMap<String, Vec<&Post>> = HashMap::new();
        for post in posts {
            for label in &post.categories {
                categories.entry(label.clone()).or_insert_with(Vec::new).push(post);
            }
        }
        for grouped in categories.values_mut() {
            grouped.sort_by(|a, b| b.date.cmp(&a.date));
        }

        Payload {
            time: Utc::now(),
            posts: ordered,
            categories,
        }
    }

    /// Converts the payload into the `site` template value.
    pub fn to_value(&self) -> Value {
        let mut m: HashMap<String, Value> = HashMap::new();
        m.insert("time".to_owned(), Value::String(self.time.to_rfc3339()));
        m.insert(
            "posts".to_owned(),
            Value::Array(self.posts.iter().map(|post| Value::from(*post)).collect()),
        );
        let mut categories: HashMap<String, Value> = HashMap::new();
        for (label, grouped) in &self.categories {
            categories.insert(
                label.clone(),
                Value::Array(grouped.iter().map(|post| Value::from(*post)).collect()),
            );
        }
        m.insert("categories".to_owned(), Value::Object(categories));
        Value::Object(m)
    }
}
