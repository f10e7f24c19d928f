use reqwest::Method;

use crate::{
    types::{
        BasicResponse, CloudInstance, CloudInstances, CreateBasicResponse,
        CreateCloudInstanceParams, CreateCloudInstanceResponse, DeleteCloudInstanceParams,
        DeleteResponse, OsImage, OsImages, Plan, RebuildCloudInstanceParams,
        ResetPasswordResponse, ResizeCloudInstanceParams, ResizePlans,
    },
    Client, Error,
};

/// Lifecycle, power, snapshot and backup operations on cloud instances.
#[derive(Clone, Copy, Debug)]
pub struct CloudInstanceService<'a> {
    client: &'a Client,
}

impl<'a> CloudInstanceService<'a> {
    pub(crate) fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Deploys the instances described by `params`.
    pub async fn create(
        &self,
        params: &CreateCloudInstanceParams,
    ) -> Result<CreateCloudInstanceResponse, Error> {
        let request = self
            .client
            .new_request(Method::POST, "cloud/deploy", Some(params))?;
        self.client.send(request).await
    }

    /// Fetches a single instance. An empty result is reported as an API error.
    pub async fn read(&self, instance_id: &str) -> Result<CloudInstance, Error> {
        let request = self.client.new_request::<()>(
            Method::GET,
            &format!("cloud/{}", instance_id),
            None,
        )?;
        let response = self.client.execute(request).await?;
        let instances: CloudInstances = response.json()?;
        response.check_status(&instances)?;

        instances.cloud.into_iter().next().ok_or_else(|| {
            tracing::error!("Cloud instance {} missing from response", instance_id);
            response.api_error("", "cloud instance not found")
        })
    }

    pub async fn list(&self) -> Result<Vec<CloudInstance>, Error> {
        let request = self.client.new_request::<()>(Method::GET, "cloud", None)?;
        let instances: CloudInstances = self.client.send(request).await?;
        Ok(instances.cloud)
    }

    /// Destroys an instance. `params.confirm` must hold the provider's
    /// acknowledgement sentence.
    pub async fn delete(
        &self,
        instance_id: &str,
        params: &DeleteCloudInstanceParams,
    ) -> Result<DeleteResponse, Error> {
        let request = self.client.new_request(
            Method::DELETE,
            &format!("cloud/{}/destroy", instance_id),
            Some(params),
        )?;
        self.client.send(request).await
    }

    /// Images available for deploying or rebuilding.
    pub async fn list_os_images(&self) -> Result<Vec<OsImage>, Error> {
        let request = self
            .client
            .new_request::<()>(Method::GET, "cloud/images", None)?;
        let images: OsImages = self.client.send(request).await?;
        Ok(images.images)
    }

    /// Plans the instance can be resized to.
    pub async fn list_resize_plans(&self, instance_id: &str) -> Result<Vec<Plan>, Error> {
        let request = self.client.new_request::<()>(
            Method::GET,
            &format!("cloud/{}/resizeplans", instance_id),
            None,
        )?;
        let plans: ResizePlans = self.client.send(request).await?;
        Ok(plans.plans)
    }

    pub async fn create_snapshot(&self, instance_id: &str) -> Result<CreateBasicResponse, Error> {
        let request = self.client.new_request::<()>(
            Method::POST,
            &format!("cloud/{}/snapshot/create", instance_id),
            None,
        )?;
        self.client.send(request).await
    }

    pub async fn delete_snapshot(
        &self,
        instance_id: &str,
        snapshot_id: &str,
    ) -> Result<DeleteResponse, Error> {
        let request = self.client.new_request::<()>(
            Method::DELETE,
            &format!("cloud/{}/snapshot/{}/delete", instance_id, snapshot_id),
            None,
        )?;
        self.client.send(request).await
    }

    pub async fn restore_snapshot(
        &self,
        instance_id: &str,
        snapshot_id: &str,
    ) -> Result<BasicResponse, Error> {
        self.action(instance_id, &format!("snapshot/{}/restore", snapshot_id))
            .await
    }

    pub async fn enable_backup(&self, instance_id: &str) -> Result<BasicResponse, Error> {
        self.action(instance_id, "backups/enable").await
    }

    pub async fn disable_backup(&self, instance_id: &str) -> Result<BasicResponse, Error> {
        self.action(instance_id, "backups/disable").await
    }

    pub async fn hard_reboot(&self, instance_id: &str) -> Result<BasicResponse, Error> {
        self.action(instance_id, "hardreboot").await
    }

    pub async fn power_cycle(&self, instance_id: &str) -> Result<BasicResponse, Error> {
        self.action(instance_id, "powercycle").await
    }

    pub async fn power_off(&self, instance_id: &str) -> Result<BasicResponse, Error> {
        self.action(instance_id, "poweroff").await
    }

    pub async fn power_on(&self, instance_id: &str) -> Result<BasicResponse, Error> {
        self.action(instance_id, "poweron").await
    }

    /// Reinstalls the instance from `params.image`, wiping its disks.
    pub async fn rebuild(
        &self,
        instance_id: &str,
        params: &RebuildCloudInstanceParams,
    ) -> Result<BasicResponse, Error> {
        let request = self.client.new_request(
            Method::POST,
            &format!("cloud/{}/rebuild", instance_id),
            Some(params),
        )?;
        self.client.send(request).await
    }

    pub async fn reset_password(&self, instance_id: &str) -> Result<ResetPasswordResponse, Error> {
        let request = self.client.new_request::<()>(
            Method::POST,
            &format!("cloud/{}/resetpassword", instance_id),
            None,
        )?;
        self.client.send(request).await
    }

    pub async fn resize(
        &self,
        instance_id: &str,
        params: &ResizeCloudInstanceParams,
    ) -> Result<BasicResponse, Error> {
        let request = self.client.new_request(
            Method::POST,
            &format!("cloud/{}/resize", instance_id),
            Some(params),
        )?;
        self.client.send(request).await
    }

    /// Bodiless `POST cloud/{id}/{action}`.
    async fn action(&self, instance_id: &str, action: &str) -> Result<BasicResponse, Error> {
        let request = self.client.new_request::<()>(
            Method::POST,
            &format!("cloud/{}/{}", instance_id, action),
            None,
        )?;
        self.client.send(request).await
    }
}
