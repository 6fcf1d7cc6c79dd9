//! Static analysis catalogs. Everything here is an immutable literal built on demand.

use crate::models::{
  ClusterReport, Forecast, InfluenceFactor, LocationCluster, SentimentCorrelation, SentimentFactor, TaskType, Trend,
};

pub const FACTOR_ANALYSIS: &str = "factor-analysis";
pub const SENTIMENT_CORRELATION: &str = "sentiment-correlation";
pub const TIME_SERIES: &str = "time-series";
pub const LOCATION_CLUSTERING: &str = "location-clustering";

pub const DEFAULT_FORECAST_ANIME: &str = "灌篮高手";

fn task_type(id: &str, name: &str, description: &str) -> TaskType {
  TaskType {
    id: id.into(),
    name: name.into(),
    description: description.into(),
  }
}

pub fn task_types() -> Vec<TaskType> {
  vec![
    task_type(FACTOR_ANALYSIS, "影响因素分析", "分析影响动漫圣地巡礼热度的关键因素及其权重"),
    task_type(SENTIMENT_CORRELATION, "情感相关性分析", "分析社交媒体上的情感表达与圣地访问热度的相关性"),
    task_type(TIME_SERIES, "时间序列预测", "基于历史数据预测未来6个月的圣地访问热度趋势"),
    task_type(LOCATION_CLUSTERING, "地理位置聚类", "对圣地位置进行聚类分析，发现地理分布规律"),
  ]
}

fn factor(name: &str, value: f64, description: &str, trend: Trend, keywords: [&str; 5]) -> InfluenceFactor {
  InfluenceFactor {
    name: name.into(),
    value,
    description: description.into(),
    trend,
    keywords: keywords.iter().map(|k| k.to_string()).collect(),
  }
}

pub fn influence_factors() -> Vec<InfluenceFactor> {
  vec![
    factor("原作人气", 0.92, "原作动漫/漫画的人气程度对圣地巡礼热度有直接影响", Trend::Up,
      ["新作品", "续作", "经典", "销量", "口碑"]),
    factor("场景还原度", 0.85, "动漫场景与现实地点的相似程度", Trend::Stable,
      ["相似", "一致", "还原", "参考", "取景"]),
    factor("交通便利性", 0.72, "前往圣地的交通便利程度", Trend::Up,
      ["车站", "公交", "机场", "交通", "路线"]),
    factor("社交媒体曝光", 0.89, "在社交媒体上的讨论热度和曝光率", Trend::Up,
      ["分享", "讨论", "热搜", "话题", "推荐"]),
    factor("周边旅游资源", 0.65, "圣地周边的其他旅游景点和资源", Trend::Stable,
      ["景点", "酒店", "美食", "购物", "文化"]),
    factor("官方推广力度", 0.78, "当地政府或企业对动漫圣地的推广力度", Trend::Up,
      ["活动", "宣传", "合作", "周边", "节日"]),
    factor("粉丝社区活跃度", 0.83, "动漫粉丝社区的活跃程度和组织能力", Trend::Up,
      ["社区", "讨论", "组织", "活动", "应援"]),
    factor("季节性因素", 0.58, "季节变化对访问热度的影响", Trend::Down,
      ["季节", "假期", "节日", "天气", "樱花"]),
  ]
}

pub fn sentiment_correlation() -> SentimentCorrelation {
  let factors = [("positive", 0.85), ("neutral", 0.32), ("negative", -0.45)]
    .into_iter()
    .map(|(sentiment, correlation)| SentimentFactor { sentiment: sentiment.into(), correlation })
    .collect();
  SentimentCorrelation {
    correlation: 0.78,
    factors,
    analysis: "正面情感与访问热度呈强正相关，负面情感与访问热度呈中等负相关".into(),
  }
}

/// The forecast points are fixed; only the title is taken from the caller.
pub fn forecast(anime: &str) -> Forecast {
  Forecast {
    anime: anime.into(),
    dates: ["2024-01", "2024-02", "2024-03", "2024-04", "2024-05", "2024-06"]
      .iter()
      .map(|d| d.to_string())
      .collect(),
    values: vec![350, 370, 390, 420, 480, 510],
    confidence: vec![[320, 380], [330, 410], [340, 440], [360, 480], [410, 550], [430, 590]],
  }
}

pub fn location_clusters() -> ClusterReport {
  let cluster = |name: &str, center: [f64; 2], count, radius| LocationCluster {
    name: name.into(),
    center,
    count,
    radius,
  };
  ClusterReport {
    clusters: vec![
      cluster("东京都市圈", [35.6895, 139.6917], 12, 50),
      cluster("京都-大阪文化圈", [34.9854, 135.7589], 8, 30),
      cluster("北海道自然区", [43.2203, 142.8635], 5, 80),
    ],
    analysis: "动漫圣地主要集中在三大地理区域，东京都市圈占比最高".into(),
  }
}
