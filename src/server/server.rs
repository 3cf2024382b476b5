use crate::application_impl::*;
use crate::application_port::*;
use crate::domain_port::*;
use crate::infra_mysql::*;
use crate::settings::Settings;
use sqlx::{MySql, Pool};
use std::sync::Arc;

pub struct Server {
    pub auth_service: Arc<dyn AuthService>,
    pub employee_service: Arc<dyn EmployeeService>,
    pub project_service: Arc<dyn ProjectService>,
    pool: Pool<MySql>,
}

impl Server {
    pub async fn try_new(settings: &Settings) -> anyhow::Result<Self> {
        let pool = Pool::<MySql>::connect(&settings.database.url).await?;
        let tx_manager: Arc<dyn TxManager> = Arc::new(MySqlTxManager::new(pool.clone()));

        let credential_hasher: Arc<dyn CredentialHasher> = Arc::new(Argon2PasswordHasher {});

        let user_repo: Arc<dyn UserRepo> = Arc::new(MySqlUserRepo::new(pool.clone()));
        let employee_repo: Arc<dyn EmployeeRepo> = Arc::new(MySqlEmployeeRepo::new(pool.clone()));
        let project_repo: Arc<dyn ProjectRepo> = Arc::new(MySqlProjectRepo::new(pool.clone()));

        let auth_service: Arc<dyn AuthService> =
            Arc::new(BasicAuthService::new(user_repo, credential_hasher));

        let employee_service: Arc<dyn EmployeeService> = Arc::new(RealEmployeeService::new(
            employee_repo.clone(),
            project_repo.clone(),
            tx_manager.clone(),
        ));

        let project_service: Arc<dyn ProjectService> =
            Arc::new(RealProjectService::new(project_repo, employee_repo));

        Ok(Server {
            auth_service,
            employee_service,
            project_service,
            pool,
        })
    }

    pub async fn shutdown(&self) {
        self.pool.close().await;
    }
}
