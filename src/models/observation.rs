use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::constants::SNOW_DEPTH_ELEMENT;

/// One row of a GHCN-Daily extract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub station_id: String,
    pub date: NaiveDate,
    pub element: String,
    /// Raw DATA_VALUE; `None` when the column is empty
    pub value: Option<f64>,
    pub m_flag: Option<String>,
    pub q_flag: Option<String>,
    pub s_flag: Option<String>,
    pub obs_time: Option<String>,
}

impl ObservationRecord {
    pub fn new(station_id: String, date: NaiveDate, element: String, value: Option<f64>) -> Self {
        Self {
            station_id,
            date,
            element,
            value,
            m_flag: None,
            q_flag: None,
            s_flag: None,
            obs_time: None,
        }
    }

    pub fn with_flags(
        mut self,
        m_flag: Option<String>,
        q_flag: Option<String>,
        s_flag: Option<String>,
        obs_time: Option<String>,
    ) -> Self {
        self.m_flag = m_flag;
        self.q_flag = q_flag;
        self.s_flag = s_flag;
        self.obs_time = obs_time;
        self
    }

    pub fn is_snow_depth(&self) -> bool {
        self.element == SNOW_DEPTH_ELEMENT
    }
}
