//! Network actor - runs gateway calls in the Tokio async runtime

use std::future::Future;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinSet;

use crate::error::GatewayError;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::MutationKind;
use crate::network::gateway::{AccountGateway, SessionInitializer};

const SESSION_PENDING: u8 = 0;
const SESSION_READY: u8 = 1;
const SESSION_FAILED: u8 = 2;

/// Network actor that executes gateway commands
///
/// Every command runs in its own task, so two fetches may overlap; each
/// response carries the command id and the app layer sorts out ordering.
pub struct NetworkActor {
    gateway: Arc<dyn AccountGateway>,
    initializer: Arc<dyn SessionInitializer>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<()>,
    session: Arc<AtomicU8>,
}

impl NetworkActor {
    pub fn new(
        gateway: Arc<dyn AccountGateway>,
        initializer: Arc<dyn SessionInitializer>,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            gateway,
            initializer,
            response_tx,
            active_requests: JoinSet::new(),
            session: Arc::new(AtomicU8::new(SESSION_PENDING)),
        }
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::Shutdown) | None => break,
                        Some(command) => self.dispatch(command),
                    }
                }

                Some(result) = self.active_requests.join_next() => {
                    if let Err(e) = result {
                        tracing::error!(error = %e, "Gateway task failed");
                    }
                }
            }
        }

        tracing::info!(in_flight = self.active_requests.len(), "Network actor stopped");
    }

    fn dispatch(&mut self, command: NetworkCommand) {
        let response_tx = self.response_tx.clone();
        let session = Arc::clone(&self.session);

        if let NetworkCommand::InitializeSession { id } = command {
            if session.load(Ordering::SeqCst) != SESSION_PENDING {
                tracing::warn!(id, "Session already initialized, ignoring");
                return;
            }
            let initializer = Arc::clone(&self.initializer);
            self.active_requests.spawn(async move {
                tracing::info!(id, "Initializing session");
                let result = guarded(async move { initializer.initialize().await }).await;
                let response = match result {
                    Ok(()) => {
                        session.store(SESSION_READY, Ordering::SeqCst);
                        NetworkResponse::SessionReady { id }
                    }
                    Err(e) => {
                        tracing::error!(id, error = %e, "Session initialization failed");
                        session.store(SESSION_FAILED, Ordering::SeqCst);
                        NetworkResponse::SessionFailed { id, message: e.to_string() }
                    }
                };
                let _ = response_tx.send(response);
            });
            return;
        }

        let gateway = Arc::clone(&self.gateway);
        self.active_requests.spawn(async move {
            let ready = session.load(Ordering::SeqCst) == SESSION_READY;
            let response = execute(gateway, command, ready).await;
            if let Some(response) = response {
                let _ = response_tx.send(response);
            }
        });
    }
}

/// Execute one gateway command and build its response
async fn execute(
    gateway: Arc<dyn AccountGateway>,
    command: NetworkCommand,
    session_ready: bool,
) -> Option<NetworkResponse> {
    let response = match command {
        NetworkCommand::FetchAccounts { id } => {
            tracing::info!(id, "Fetching accounts");
            let result = if session_ready {
                guarded(async move { gateway.list_all().await }).await
            } else {
                Err(GatewayError::SessionNotReady)
            };
            match result {
                Ok(accounts) => {
                    tracing::info!(id, "Retrieved {} accounts", accounts.len());
                    NetworkResponse::AccountsLoaded { id, accounts }
                }
                Err(e) => {
                    tracing::warn!(id, error = %e, "Fetch failed");
                    NetworkResponse::FetchFailed { id, message: e.to_string() }
                }
            }
        }
        NetworkCommand::CreateAccount { id, fields } => {
            tracing::info!(id, name = %fields.name, "Creating account");
            let result = if session_ready {
                guarded(async move { gateway.create(&fields).await.map(|_| ()) }).await
            } else {
                Err(GatewayError::SessionNotReady)
            };
            mutation_response(id, MutationKind::Create, result)
        }
        NetworkCommand::UpdateAccount { id, account_id, fields } => {
            tracing::info!(id, account_id = %account_id, "Updating account");
            let result = if session_ready {
                let call = async move { gateway.update(&account_id, &fields).await.map(|_| ()) };
                guarded(call).await
            } else {
                Err(GatewayError::SessionNotReady)
            };
            mutation_response(id, MutationKind::Update, result)
        }
        NetworkCommand::DeleteAccount { id, account_id } => {
            tracing::info!(id, account_id = %account_id, "Deleting account");
            let result = if session_ready {
                guarded(async move { gateway.delete(&account_id).await }).await
            } else {
                Err(GatewayError::SessionNotReady)
            };
            mutation_response(id, MutationKind::Delete, result)
        }
        NetworkCommand::InitializeSession { .. } | NetworkCommand::Shutdown => return None,
    };
    Some(response)
}

/// Run a gateway call in its own task so a panic surfaces as a `TaskFailed` error
async fn guarded<T, F>(call: F) -> Result<T, GatewayError>
where
    F: Future<Output = Result<T, GatewayError>> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(call).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, "Gateway call panicked");
            Err(GatewayError::TaskFailed)
        }
    }
}

fn mutation_response(
    id: u64,
    kind: MutationKind,
    result: Result<(), GatewayError>,
) -> NetworkResponse {
    match result {
        Ok(()) => {
            tracing::info!(id, kind = kind.verb(), "Mutation applied");
            NetworkResponse::MutationApplied { id, kind }
        }
        Err(e) => {
            tracing::warn!(id, kind = kind.verb(), error = %e, "Mutation failed");
            NetworkResponse::MutationFailed { id, kind, message: e.to_string() }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountFields};
    use crate::network::gateway::mock::{GatewayCall, MockGateway};
    use std::time::Duration;
    use tokio::time::timeout;

    fn spawn_actor(
        mock: Arc<MockGateway>,
    ) -> (mpsc::UnboundedSender<NetworkCommand>, mpsc::UnboundedReceiver<NetworkResponse>) {
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let actor = NetworkActor::new(mock.clone(), mock, resp_tx);
        tokio::spawn(actor.run(cmd_rx));
        (cmd_tx, resp_rx)
    }

    async fn next(rx: &mut mpsc::UnboundedReceiver<NetworkResponse>) -> NetworkResponse {
        timeout(Duration::from_secs(2), rx.recv()).await.unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_fetch_after_initialize() {
        let mock = Arc::new(MockGateway::new(vec![Account::new("1", "Fabrikam")]));
        let (tx, mut rx) = spawn_actor(mock.clone());

        tx.send(NetworkCommand::InitializeSession { id: 1 }).unwrap();
        assert_eq!(next(&mut rx).await, NetworkResponse::SessionReady { id: 1 });

        tx.send(NetworkCommand::FetchAccounts { id: 2 }).unwrap();
        match next(&mut rx).await {
            NetworkResponse::AccountsLoaded { id, accounts } => {
                assert_eq!(id, 2);
                assert_eq!(accounts.len(), 1);
            }
            other => panic!("unexpected response: {:?}", other),
        }
        assert_eq!(mock.calls(), vec![GatewayCall::Initialize, GatewayCall::ListAll]);
    }

    #[tokio::test]
    async fn test_gateway_blocked_before_session() {
        let mock = Arc::new(MockGateway::new(vec![]));
        let (tx, mut rx) = spawn_actor(mock.clone());

        tx.send(NetworkCommand::FetchAccounts { id: 1 }).unwrap();
        match next(&mut rx).await {
            NetworkResponse::FetchFailed { id, message } => {
                assert_eq!(id, 1);
                assert_eq!(message, "session is not initialized");
            }
            other => panic!("unexpected response: {:?}", other),
        }
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_failed_session_blocks_permanently() {
        let mock = Arc::new(MockGateway::new(vec![]));
        mock.set_fail_initialize(true);
        let (tx, mut rx) = spawn_actor(mock.clone());

        tx.send(NetworkCommand::InitializeSession { id: 1 }).unwrap();
        assert!(matches!(next(&mut rx).await, NetworkResponse::SessionFailed { id: 1, .. }));

        // A second handshake is not attempted
        tx.send(NetworkCommand::InitializeSession { id: 2 }).unwrap();
        tx.send(NetworkCommand::DeleteAccount { id: 3, account_id: "x".into() }).unwrap();
        match next(&mut rx).await {
            NetworkResponse::MutationFailed { id, kind, .. } => {
                assert_eq!(id, 3);
                assert_eq!(kind, MutationKind::Delete);
            }
            other => panic!("unexpected response: {:?}", other),
        }
        assert_eq!(mock.count(|c| *c == GatewayCall::Initialize), 1);
        assert_eq!(mock.count(|c| matches!(c, GatewayCall::Delete(_))), 0);
    }

    #[tokio::test]
    async fn test_panicking_fetch_reports_failure() {
        let mock = Arc::new(MockGateway::new(vec![]));
        mock.set_panic_list(true);
        let (tx, mut rx) = spawn_actor(mock.clone());

        tx.send(NetworkCommand::InitializeSession { id: 1 }).unwrap();
        next(&mut rx).await;

        tx.send(NetworkCommand::FetchAccounts { id: 2 }).unwrap();
        assert_eq!(
            next(&mut rx).await,
            NetworkResponse::FetchFailed { id: 2, message: "gateway task failed".into() }
        );

        // The actor keeps serving after the panic
        mock.set_panic_list(false);
        tx.send(NetworkCommand::FetchAccounts { id: 3 }).unwrap();
        assert!(matches!(next(&mut rx).await, NetworkResponse::AccountsLoaded { id: 3, .. }));
    }

    #[tokio::test]
    async fn test_mutation_failure_carries_detail() {
        let mock = Arc::new(MockGateway::new(vec![]));
        mock.set_fail_mutations(true);
        let (tx, mut rx) = spawn_actor(mock.clone());

        tx.send(NetworkCommand::InitializeSession { id: 1 }).unwrap();
        next(&mut rx).await;

        let fields = AccountFields::from_input("Acme", "", "").unwrap();
        tx.send(NetworkCommand::CreateAccount { id: 2, fields: fields.clone() }).unwrap();
        assert_eq!(
            next(&mut rx).await,
            NetworkResponse::MutationFailed {
                id: 2,
                kind: MutationKind::Create,
                message: "mock write failure (HTTP 500)".into(),
            }
        );
        assert_eq!(mock.calls()[1], GatewayCall::Create(fields));
    }
}
