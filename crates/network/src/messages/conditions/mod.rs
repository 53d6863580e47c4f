//! Witness condition helpers mirroring the C# payload hierarchy.

pub mod and_condition;
pub mod boolean_condition;
pub mod called_by_contract_condition;
pub mod called_by_entry_condition;
pub mod called_by_group_condition;
pub mod group_condition;
pub mod not_condition;
pub mod or_condition;
pub mod script_hash_condition;
pub mod witness_condition;
pub mod witness_condition_type;

pub use and_condition::new as new_and;
pub use boolean_condition::{new as new_boolean, value as boolean_value};
pub use called_by_contract_condition::{hash as called_by_contract_hash, new as new_called_by_contract};
pub use called_by_entry_condition::{is_called_by_entry, new as new_called_by_entry};
pub use called_by_group_condition::{group_bytes as called_by_group_bytes, new as new_called_by_group};
pub use group_condition::{group_bytes as group_bytes, new as new_group};
pub use not_condition::{expression as not_expression, new as new_not};
pub use or_condition::{expressions as or_expressions, new as new_or};
pub use script_hash_condition::{hash as script_hash_value, new as new_script_hash};
pub use witness_condition::{is_valid, MAX_NESTING_DEPTH, MAX_SUBITEMS, WitnessCondition, WitnessConditionType};
