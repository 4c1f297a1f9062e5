use tracing::{debug, instrument};
use crate::account_actor::{AccountError, BookAction, BookActionResult};
use crate::actor_framework::ResourceClient;
use crate::domain::{Address, BankAccount, MainBook, MainRecord};

/// Client for the per-owner address and bank account books.
#[derive(Clone)]
pub struct AccountClient {
    addresses: ResourceClient<MainBook<Address>>,
    bank_accounts: ResourceClient<MainBook<BankAccount>>,
}

impl AccountClient {
    pub fn new(
        addresses: ResourceClient<MainBook<Address>>,
        bank_accounts: ResourceClient<MainBook<BankAccount>>,
    ) -> Self {
        Self { addresses, bank_accounts }
    }

    // --- Addresses ---

    /// Saves a new address and returns its id. The owner's first address becomes main.
    #[instrument(skip(self, address), fields(label = %address.label))]
    pub async fn add_address(&self, owner: String, address: Address, make_main: bool) -> Result<String, AccountError> {
        debug!("Sending request");
        add(&self.addresses, owner, address, make_main).await
    }

    #[instrument(skip(self, address))]
    pub async fn update_address(&self, owner: String, id: String, address: Address) -> Result<(), AccountError> {
        debug!("Sending request");
        act(&self.addresses, owner, BookAction::Update { id, record: address }).await.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn set_main_address(&self, owner: String, id: String) -> Result<(), AccountError> {
        debug!("Sending request");
        act(&self.addresses, owner, BookAction::SetMain(id)).await.map(|_| ())
    }

    /// Returns the id of the address promoted to main, if the main one was removed.
    #[instrument(skip(self))]
    pub async fn remove_address(&self, owner: String, id: String) -> Result<Option<String>, AccountError> {
        debug!("Sending request");
        remove(&self.addresses, owner, id).await
    }

    #[instrument(skip(self))]
    pub async fn list_addresses(&self, owner: String) -> Result<Vec<Address>, AccountError> {
        debug!("Sending request");
        Ok(book(&self.addresses, owner).await?.records)
    }

    #[instrument(skip(self))]
    pub async fn main_address(&self, owner: String) -> Result<Option<Address>, AccountError> {
        debug!("Sending request");
        Ok(book(&self.addresses, owner).await?.main().cloned())
    }

    // --- Bank accounts ---

    #[instrument(skip(self, account), fields(bank = %account.bank_name))]
    pub async fn add_bank_account(&self, owner: String, account: BankAccount, make_main: bool) -> Result<String, AccountError> {
        debug!("Sending request");
        add(&self.bank_accounts, owner, account, make_main).await
    }

    #[instrument(skip(self, account))]
    pub async fn update_bank_account(&self, owner: String, id: String, account: BankAccount) -> Result<(), AccountError> {
        debug!("Sending request");
        act(&self.bank_accounts, owner, BookAction::Update { id, record: account }).await.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn set_main_bank_account(&self, owner: String, id: String) -> Result<(), AccountError> {
        debug!("Sending request");
        act(&self.bank_accounts, owner, BookAction::SetMain(id)).await.map(|_| ())
    }

    #[instrument(skip(self))]
    pub async fn remove_bank_account(&self, owner: String, id: String) -> Result<Option<String>, AccountError> {
        debug!("Sending request");
        remove(&self.bank_accounts, owner, id).await
    }

    #[instrument(skip(self))]
    pub async fn list_bank_accounts(&self, owner: String) -> Result<Vec<BankAccount>, AccountError> {
        debug!("Sending request");
        Ok(book(&self.bank_accounts, owner).await?.records)
    }

    #[instrument(skip(self))]
    pub async fn main_bank_account(&self, owner: String) -> Result<Option<BankAccount>, AccountError> {
        debug!("Sending request");
        Ok(book(&self.bank_accounts, owner).await?.main().cloned())
    }
}

async fn book<R: MainRecord>(books: &ResourceClient<MainBook<R>>, owner: String) -> Result<MainBook<R>, AccountError> {
    let found = books.get(owner.clone()).await?;
    Ok(found.unwrap_or_else(|| MainBook::new(owner)))
}

async fn act<R: MainRecord>(
    books: &ResourceClient<MainBook<R>>,
    owner: String,
    action: BookAction<R>,
) -> Result<BookActionResult, AccountError> {
    books.ensure(MainBook::new(owner.clone())).await?;
    Ok(books.perform_action(owner, action).await?)
}

async fn add<R: MainRecord>(
    books: &ResourceClient<MainBook<R>>,
    owner: String,
    record: R,
    make_main: bool,
) -> Result<String, AccountError> {
    match act(books, owner, BookAction::Add { record, make_main }).await? {
        BookActionResult::Added(id) => Ok(id),
        other => Err(unexpected(other)),
    }
}

async fn remove<R: MainRecord>(
    books: &ResourceClient<MainBook<R>>,
    owner: String,
    id: String,
) -> Result<Option<String>, AccountError> {
    match act(books, owner, BookAction::Remove(id)).await? {
        BookActionResult::Removed { new_main } => Ok(new_main),
        other => Err(unexpected(other)),
    }
}

fn unexpected(result: BookActionResult) -> AccountError {
    AccountError::ActorCommunicationError(format!("Unexpected result: {:?}", result))
}
