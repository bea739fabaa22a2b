/// Telegram adapter - the live client behind the `Messenger` port
use std::io::{self, BufRead, Write};

use anyhow::Context as _;
use grammers_client::{Client, Config as ClientConfig, InitParams, SignInError};
use grammers_session::{PackedChat, PackedType, Session};
use grammers_tl_types as tl;
use tracing::info;

use crate::config::Config;
use crate::constants::SESSION_FILE;
use crate::messaging::{Messenger, ResolveError, SendError};
use crate::models::ContactRow;

/// One authenticated connection to Telegram, valid for a single run
pub struct TelegramSession {
    client: Client,
}

impl TelegramSession {
    /// Connect and authenticate.
    ///
    /// The session is persisted to a local file, so only the first run
    /// requires the interactive login flow.
    pub async fn open(config: &Config) -> anyhow::Result<Self> {
        let session = Session::load_file_or_create(SESSION_FILE)
            .with_context(|| format!("failed to load session file '{}'", SESSION_FILE))?;

        let client = Client::connect(ClientConfig {
            session,
            api_id: config.api_id,
            api_hash: config.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .context("failed to connect to Telegram")?;

        if !client.is_authorized().await? {
            sign_in(&client).await?;
        }

        info!("Telegram session ready");
        Ok(Self { client })
    }

    /// Save the session file and drop the connection.
    ///
    /// Called exactly once per run on every path after a successful open.
    pub fn close(self) -> anyhow::Result<()> {
        self.client
            .session()
            .save_to_file(SESSION_FILE)
            .with_context(|| format!("failed to save session file '{}'", SESSION_FILE))
    }
}

impl Messenger for TelegramSession {
    type Recipient = PackedChat;

    async fn resolve_phone(&self, phone: &str) -> Result<PackedChat, ResolveError> {
        let resolved = self
            .client
            .invoke(&tl::functions::contacts::ResolvePhone {
                phone: phone.to_string(),
            })
            .await
            .map_err(|e| ResolveError::Platform(e.to_string()))?;

        let tl::enums::contacts::ResolvedPeer::Peer(resolved) = resolved;
        resolved
            .users
            .iter()
            .find_map(user_to_packed)
            .ok_or_else(|| ResolveError::NotFound {
                phone: phone.to_string(),
            })
    }

    async fn import_contact(&self, row: &ContactRow) -> Result<PackedChat, ResolveError> {
        let request = tl::functions::contacts::ImportContacts {
            contacts: vec![
                tl::types::InputPhoneContact {
                    client_id: 0,
                    phone: row.phone.clone(),
                    first_name: row.first_name.clone(),
                    last_name: row.other_name.clone(),
                }
                .into(),
            ],
        };

        let imported = self
            .client
            .invoke(&request)
            .await
            .map_err(|e| ResolveError::ImportFailed {
                phone: row.phone.clone(),
                detail: e.to_string(),
            })?;

        let tl::enums::contacts::ImportedContacts::Contacts(imported) = imported;
        imported
            .users
            .iter()
            .find_map(user_to_packed)
            .ok_or_else(|| ResolveError::ImportFailed {
                phone: row.phone.clone(),
                detail: "number is not on Telegram".to_string(),
            })
    }

    async fn send_text(&self, recipient: &PackedChat, text: &str) -> Result<(), SendError> {
        self.client
            .send_message(recipient.clone(), text)
            .await
            .map(|_| ())
            .map_err(|e| SendError(e.to_string()))
    }
}

/// First-run interactive login: phone number, one-time code and, when the
/// account has one, the 2FA password.
async fn sign_in(client: &Client) -> anyhow::Result<()> {
    let phone = prompt("Enter your phone number (international format): ")?;
    let token = client
        .request_login_code(&phone)
        .await
        .context("failed to request login code")?;

    let code = prompt("Enter the code you received: ")?;
    match client.sign_in(&token, &code).await {
        Ok(_) => {}
        Err(SignInError::PasswordRequired(password_token)) => {
            let hint = password_token.hint().unwrap_or("none");
            let password = prompt(&format!("Enter the password (hint: {}): ", hint))?;
            client
                .check_password(password_token, password.trim())
                .await
                .context("password check failed")?;
        }
        Err(e) => return Err(e).context("sign in failed"),
    }

    // Persist right away so later runs skip the interactive login
    client
        .session()
        .save_to_file(SESSION_FILE)
        .with_context(|| format!("failed to save session file '{}'", SESSION_FILE))?;

    info!("Signed in; session saved to {}", SESSION_FILE);
    Ok(())
}

/// Build a sendable handle from a raw user returned by the API
fn user_to_packed(user: &tl::enums::User) -> Option<PackedChat> {
    match user {
        tl::enums::User::User(user) => Some(PackedChat {
            ty: if user.bot {
                PackedType::Bot
            } else {
                PackedType::User
            },
            id: user.id,
            access_hash: user.access_hash,
        }),
        tl::enums::User::Empty(_) => None,
    }
}

/// Print `message` and read one trimmed line from stdin
fn prompt(message: &str) -> anyhow::Result<String> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(message.as_bytes())?;
    stdout.flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
