use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
}

/// Request body accepted by create and update. A client `id` must be an
/// integer when present but is otherwise ignored; the store or the request
/// path decides it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    #[allow(dead_code)]
    pub id: Option<i64>,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_id_is_optional() {
        let item: NewItem = serde_json::from_str(r#"{"name":"apple"}"#).expect("decode");
        assert_eq!(item.name, "apple");
        assert_eq!(item.id, None);
    }

    #[test]
    fn body_id_must_be_an_integer() {
        assert!(serde_json::from_str::<NewItem>(r#"{"id":"x","name":"apple"}"#).is_err());
        assert!(serde_json::from_str::<NewItem>(r#"{"id":1.5,"name":"apple"}"#).is_err());
        assert!(serde_json::from_str::<NewItem>(r#"{"id":null,"name":"apple"}"#).is_ok());
    }
}
