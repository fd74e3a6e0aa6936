//! Label catalogs.
//!
//! English defaults with serde overrides, so hosts can localize by merging a
//! partial catalog over `Default`.

use serde::{Deserialize, Serialize};

/// Labels used by the class lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LookupLabels {
    pub class_input_placeholder: String,
    pub class_type_batchable: String,
    pub class_type_schedulable: String,
    pub clear_class_search: String,
    pub remove_class: String,
    pub select_class: String,
    pub spinner_alt_text_searching: String,
}

impl Default for LookupLabels {
    fn default() -> Self {
        Self {
            class_input_placeholder: "Search classes...".to_string(),
            class_type_batchable: "Batchable".to_string(),
            class_type_schedulable: "Schedulable".to_string(),
            clear_class_search: "Clear class search".to_string(),
            remove_class: "Remove selected class".to_string(),
            select_class: "Select a class".to_string(),
            spinner_alt_text_searching: "Searching".to_string(),
        }
    }
}

/// Labels used by the scheduling form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormLabels {
    pub main_choice_class: String,
    pub main_choice_flow: String,
    pub main_choice_code: String,
    pub anonymous_code_job_prefix: String,
    pub flow_retrieval_error: String,
    pub start_time_passed: String,
    pub toast_success_title: String,
    pub toast_success_message: String,
    pub spinner_alt_text_loading: String,
    pub spinner_alt_text_scheduling: String,
}

impl Default for FormLabels {
    fn default() -> Self {
        Self {
            main_choice_class: "Apex class".to_string(),
            main_choice_flow: "Flow".to_string(),
            main_choice_code: "Anonymous code".to_string(),
            anonymous_code_job_prefix: "Anonymous code".to_string(),
            flow_retrieval_error: "Flows could not be retrieved".to_string(),
            start_time_passed: "The start time has already passed".to_string(),
            toast_success_title: "Success!".to_string(),
            toast_success_message: "Your job has been scheduled".to_string(),
            spinner_alt_text_loading: "Loading".to_string(),
            spinner_alt_text_scheduling: "Scheduling".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let labels: LookupLabels =
            serde_json::from_str(r#"{"class_input_placeholder": "Chercher..."}"#).unwrap();
        assert_eq!(labels.class_input_placeholder, "Chercher...");
        assert_eq!(labels.class_type_schedulable, "Schedulable");
    }
}
