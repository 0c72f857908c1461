//! AI 配置

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::evaluate::{Heuristic, MobilityPressure};

/// 搜索方法
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SearchMethod {
    /// 朴素 Minimax
    #[default]
    #[serde(rename = "minimax")]
    Minimax,
    /// Alpha-Beta 剪枝
    #[serde(rename = "alphabeta")]
    AlphaBeta,
}

impl SearchMethod {
    pub fn name(&self) -> &'static str {
        match self {
            SearchMethod::Minimax => "minimax",
            SearchMethod::AlphaBeta => "alphabeta",
        }
    }
}

impl FromStr for SearchMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minimax" => Ok(SearchMethod::Minimax),
            "alphabeta" => Ok(SearchMethod::AlphaBeta),
            _ => Err(ConfigError::UnknownMethod(s.to_string())),
        }
    }
}

impl std::fmt::Display for SearchMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// AI 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// 固定深度搜索的层数（迭代加深时忽略）
    pub search_depth: u32,
    /// 评估函数
    pub heuristic: Heuristic,
    /// 是否使用迭代加深
    pub iterative: bool,
    /// 搜索方法
    pub method: SearchMethod,
    /// 剩余时间低于该值（毫秒）时中止搜索
    pub timer_threshold_ms: f64,
    /// 行动力压制系数（仅 mobility-pressure 使用）
    pub pressure_weight: f64,
}

impl AgentConfig {
    /// 默认固定搜索深度
    pub const DEFAULT_SEARCH_DEPTH: u32 = 3;

    /// 默认超时阈值（毫秒）
    pub const DEFAULT_TIMER_THRESHOLD_MS: f64 = 10.0;

    /// 指定方法与评估函数，其余取默认值
    pub fn new(method: SearchMethod, heuristic: Heuristic) -> Self {
        Self {
            method,
            heuristic,
            ..Self::default()
        }
    }

    /// 改为固定深度搜索
    pub fn fixed_depth(mut self, depth: u32) -> Self {
        self.iterative = false;
        self.search_depth = depth;
        self
    }

    /// 设置超时阈值
    pub fn with_threshold_ms(mut self, threshold_ms: f64) -> Self {
        self.timer_threshold_ms = threshold_ms;
        self
    }

    /// 检查配置，错误的配置在搜索开始前就被拒绝
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search_depth == 0 {
            return Err(ConfigError::NonPositiveDepth);
        }
        if !self.timer_threshold_ms.is_finite() || self.timer_threshold_ms <= 0.0 {
            return Err(ConfigError::InvalidThreshold(self.timer_threshold_ms));
        }
        if !self.pressure_weight.is_finite() {
            return Err(ConfigError::InvalidWeight(self.pressure_weight));
        }
        Ok(())
    }

    /// 从 JSON 字符串解析并检查
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: AgentConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载并检查
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            search_depth: Self::DEFAULT_SEARCH_DEPTH,
            heuristic: Heuristic::default(),
            iterative: true,
            method: SearchMethod::default(),
            timer_threshold_ms: Self::DEFAULT_TIMER_THRESHOLD_MS,
            pressure_weight: MobilityPressure::DEFAULT_WEIGHT,
        }
    }
}
