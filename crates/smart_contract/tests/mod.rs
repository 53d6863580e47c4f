//! Smart contract test modules

// Test modules converted from C# Neo unit tests
mod application_engine_tests;
mod binary_serializer_tests;
mod contract_manifest_tests;
mod contract_parameter_context_tests;
mod contract_parameter_tests;
mod contract_state_tests;
mod contract_tests;
mod gas_token_tests;
mod helper_tests;
mod interop_prices_tests;
mod interop_service_tests;
mod key_builder_tests;
mod log_event_args_tests;
mod method_token_tests;
mod native_contract_tests;
mod nef_file_tests;
mod neo_token_comprehensive_tests;
mod neo_token_tests;
mod policy_contract_tests;
mod role_management_tests;
mod stdlib_tests;
mod storage_tests;
mod syscalls_tests;
