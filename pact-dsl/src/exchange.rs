use crate::{data::ResponseData, error::Error};
use async_trait::async_trait;
use hyper::{body, Body, Response};

/// What an exerciser function resolves to: one response or an aggregate of them.
///
/// Aggregates yield their payloads in element order, so a `Vec` built by
/// `try_join_all` keeps the order in which the calls were issued.
#[async_trait]
pub trait ExchangeOutcome: Send + Sized {
    async fn into_payloads(self) -> Result<Vec<String>, Error>;
}

#[async_trait]
impl ExchangeOutcome for reqwest::Response {
    async fn into_payloads(self) -> Result<Vec<String>, Error> {
        Ok(vec![self.text().await?])
    }
}

#[async_trait]
impl ExchangeOutcome for Response<Body> {
    async fn into_payloads(self) -> Result<Vec<String>, Error> {
        let body = body::to_bytes(self.into_body())
            .await
            .map_err(Error::transport)?;

        Ok(vec![String::from_utf8_lossy(&body).into()])
    }
}

#[async_trait]
impl ExchangeOutcome for ResponseData {
    async fn into_payloads(self) -> Result<Vec<String>, Error> {
        Ok(vec![self.body])
    }
}

#[async_trait]
impl ExchangeOutcome for String {
    async fn into_payloads(self) -> Result<Vec<String>, Error> {
        Ok(vec![self])
    }
}

#[async_trait]
impl<T: ExchangeOutcome> ExchangeOutcome for Vec<T> {
    async fn into_payloads(self) -> Result<Vec<String>, Error> {
        let mut payloads = Vec::with_capacity(self.len());

        for outcome in self {
            payloads.extend(outcome.into_payloads().await?);
        }

        Ok(payloads)
    }
}

macro_rules! tuple_outcome {
    ($($name:ident $value:ident),+) => {
        #[async_trait]
        impl<$($name: ExchangeOutcome),+> ExchangeOutcome for ($($name,)+) {
            async fn into_payloads(self) -> Result<Vec<String>, Error> {
                let ($($value,)+) = self;
                let mut payloads = Vec::new();
                $(payloads.extend($value.into_payloads().await?);)+
                Ok(payloads)
            }
        }
    };
}

tuple_outcome!(A a, B b);
tuple_outcome!(A a, B b, C c);
