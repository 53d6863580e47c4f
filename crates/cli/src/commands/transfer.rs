//! Transfer command - transfer NEP-17 tokens

use super::CommandResult;
use neo_rpc_client::RpcClient;

pub async fn execute(
    _client: &RpcClient,
    token: &str,
    to: &str,
    amount: &str,
    from: Option<&str>,
    data: Option<&str>,
) -> CommandResult {
    // Transfer requires wallet access and transaction signing

    Ok(format!(
        "Transfer command requires wallet integration.\n\
        Token: {}\n\
        To: {}\n\
        Amount: {}\n\
        From: {}\n\
        Data: {}\n\n\
        Note: Use neo-node with wallet configuration for transaction signing.",
        token,
        to,
        amount,
        from.unwrap_or("<default>"),
        data.unwrap_or("<none>")
    ))
}
