use crate::frontmatter::Frontmatter;
use crate::page::Page;
use crate::post::Post;
use gtmpl_value::Value;
use std::collections::HashMap;

/// Converts a YAML value into a template [`Value`]. Mapping keys that
/// are not strings are dropped.
pub fn yaml(value: &serde_yaml::Value) -> Value {
    use serde_yaml::Value as Yaml;
    match value {
        Yaml::Null => Value::Nil,
        Yaml::Bool(b) => Value::from(*b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                Value::from(n.as_f64().unwrap_or(0.0))
            }
        }
        Yaml::String(s) => Value::from(s.as_str()),
        Yaml::Sequence(values) => Value::Array(values.iter().map(yaml).collect()),
        Yaml::Mapping(mapping) => {
            let mut m: HashMap<String, Value> = HashMap::new();
            for (key, value) in mapping {
                if let Some(key) = key.as_str() {
                    m.insert(key.to_owned(), yaml(value));
                }
            }
            Value::Object(m)
        }
    }
}

fn extra_data(front: &Frontmatter) -> HashMap<String, Value> {
    let mut m: HashMap<String, Value> = HashMap::new();
    for (key, value) in &front.extra {
        m.insert(key.clone(), yaml(value));
    }
    m
}

impl From<&Post> for Value {
    fn from(post: &Post) -> Value {
        let mut m = extra_data(&post.front);
        let title = post.front.title.as_deref().unwrap_or(&post.slug);
        m.insert("title".to_owned(), title.into());
        m.insert(
            "date".to_owned(),
            Value::String(post.date.format("%Y-%m-%d").to_string()),
        );
        m.insert("url".to_owned(), Value::String(post.url()));
        m.insert("slug".to_owned(), (&post.slug).into());
        m.insert(
            "categories".to_owned(),
            Value::Array(post.categories.iter().map(Value::from).collect()),
        );
        Value::Object(m)
    }
}

impl From<&Page> for Value {
    fn from(page: &Page) -> Value {
        let mut m = extra_data(&page.front);
        let title = page.front.title.as_deref().unwrap_or_else(|| page.stem());
        m.insert("title".to_owned(), title.into());
        m.insert("url".to_owned(), Value::String(page.url()));
        Value::Object(m)
    }
}
