use crate::domain_port::{StorageTx, TxManager};

/// No-op transaction manager for tests; the fake repos apply writes
/// immediately, so commit and rollback have nothing to do.
pub struct FakeTxManager;

#[async_trait::async_trait]
impl TxManager for FakeTxManager {
    async fn begin<'t>(&'t self) -> anyhow::Result<Box<dyn StorageTx<'t> + 't>> {
        Ok(Box::new(FakeTx))
    }
}

pub struct FakeTx;

#[async_trait::async_trait]
impl<'t> StorageTx<'t> for FakeTx {
    async fn commit(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> anyhow::Result<()> {
        Ok(())
    }
}
