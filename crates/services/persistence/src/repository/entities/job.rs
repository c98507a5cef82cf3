//! Job document mapping.

use bson::oid::ObjectId;
use bson::Document;
use serde::{Deserialize, Serialize};

use domain::job::dedup_ordered;
use domain::Job;

use super::non_empty;
use crate::error::StoreResult;
use crate::repository::object_id;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_skills: Vec<String>,
    pub posted_date: bson::DateTime,
    pub url: String,
    pub last_updated: bson::DateTime,
}

impl JobDocument {
    /// Map a domain job, decoding its identifier if one is set.
    pub fn from_job(job: &Job) -> StoreResult<Self> {
        let id = job.id.as_deref().map(object_id::decode).transpose()?;

        Ok(Self {
            id,
            title: job.title.clone(),
            company: job.company.clone(),
            location: job.location.clone(),
            description: job.description.clone(),
            salary: non_empty(&job.salary),
            job_type: non_empty(&job.job_type),
            experience_level: non_empty(&job.experience_level),
            required_skills: dedup_ordered(job.required_skills.iter().cloned()),
            posted_date: bson::DateTime::from_chrono(job.posted_date),
            url: job.url.clone(),
            last_updated: bson::DateTime::from_chrono(job.last_updated),
        })
    }

    pub fn to_document(&self) -> StoreResult<Document> {
        Ok(bson::to_document(self)?)
    }

    pub fn from_document(document: Document) -> StoreResult<Self> {
        Ok(bson::from_document(document)?)
    }
}

impl From<JobDocument> for Job {
    fn from(doc: JobDocument) -> Self {
        Job {
            id: doc.id.as_ref().map(object_id::encode),
            title: doc.title,
            company: doc.company,
            location: doc.location,
            description: doc.description,
            salary: doc.salary,
            job_type: doc.job_type,
            experience_level: doc.experience_level,
            required_skills: doc.required_skills,
            posted_date: doc.posted_date.to_chrono(),
            url: doc.url,
            last_updated: doc.last_updated.to_chrono(),
        }
    }
}
