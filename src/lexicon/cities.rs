//! Per-city geo configuration for place-lookup bias
//!
//! Each entry carries the coordinates and radius used to bias provider text
//! searches, plus the address substrings that confirm a result really sits in
//! the city (a same-named venue in another city fails this check).

use std::collections::HashMap;

/// Geo configuration for one canonical city
#[derive(Debug, Clone, Copy)]
pub struct CityConfig {
    /// Canonical Chinese name
    pub name: &'static str,
    /// English display name
    pub en_name: &'static str,
    pub lat: f64,
    pub lng: f64,
    /// Search bias radius in meters
    pub radius_m: u32,
    /// Address substrings that confirm a result belongs to the city
    pub address_keywords: &'static [&'static str],
}

const CONFIGS: &[CityConfig] = &[
    // 台灣
    CityConfig {
        name: "台北",
        en_name: "Taipei",
        lat: 25.0330,
        lng: 121.5654,
        radius_m: 15000,
        address_keywords: &[
            "台北", "北市", "新北", "信義", "大安", "中山", "松山", "萬華", "中正", "士林",
            "內湖", "南港", "文山", "北投", "大同", "板橋", "永和", "新店", "Taipei",
        ],
    },
    CityConfig {
        name: "台中",
        en_name: "Taichung",
        lat: 24.1477,
        lng: 120.6736,
        radius_m: 15000,
        address_keywords: &["台中", "中市", "Taichung"],
    },
    CityConfig {
        name: "高雄",
        en_name: "Kaohsiung",
        lat: 22.6273,
        lng: 120.3014,
        radius_m: 15000,
        address_keywords: &["高雄", "高市", "Kaohsiung"],
    },
    CityConfig {
        name: "台南",
        en_name: "Tainan",
        lat: 22.9998,
        lng: 120.2270,
        radius_m: 15000,
        address_keywords: &["台南", "南市", "Tainan"],
    },
    CityConfig {
        name: "花蓮",
        en_name: "Hualien",
        lat: 23.9910,
        lng: 121.6111,
        radius_m: 20000,
        address_keywords: &["花蓮", "Hualien"],
    },
    CityConfig {
        name: "宜蘭",
        en_name: "Yilan",
        lat: 24.7570,
        lng: 121.7533,
        radius_m: 20000,
        address_keywords: &["宜蘭", "Yilan"],
    },
    // 日本
    CityConfig {
        name: "東京",
        en_name: "Tokyo",
        lat: 35.6762,
        lng: 139.6503,
        radius_m: 25000,
        address_keywords: &["東京", "Tokyo", "渋谷", "新宿", "銀座", "六本木", "Japan", "日本"],
    },
    CityConfig {
        name: "大阪",
        en_name: "Osaka",
        lat: 34.6937,
        lng: 135.5023,
        radius_m: 20000,
        address_keywords: &["大阪", "Osaka", "難波", "梅田", "心斎橋", "Japan", "日本"],
    },
    CityConfig {
        name: "京都",
        en_name: "Kyoto",
        lat: 35.0116,
        lng: 135.7681,
        radius_m: 15000,
        address_keywords: &["京都", "Kyoto", "Japan", "日本"],
    },
    CityConfig {
        name: "北海道",
        en_name: "Hokkaido",
        lat: 43.0642,
        lng: 141.3469,
        radius_m: 30000,
        address_keywords: &["北海道", "札幌", "Sapporo", "Hokkaido", "Japan"],
    },
    CityConfig {
        name: "沖繩",
        en_name: "Okinawa",
        lat: 26.3344,
        lng: 127.8056,
        radius_m: 30000,
        address_keywords: &["沖繩", "那覇", "Okinawa", "Naha", "Japan"],
    },
    CityConfig {
        name: "福岡",
        en_name: "Fukuoka",
        lat: 33.5904,
        lng: 130.4017,
        radius_m: 15000,
        address_keywords: &["福岡", "Fukuoka", "Japan"],
    },
    CityConfig {
        name: "名古屋",
        en_name: "Nagoya",
        lat: 35.1815,
        lng: 136.9066,
        radius_m: 15000,
        address_keywords: &["名古屋", "Nagoya", "Japan"],
    },
    // 韓國
    CityConfig {
        name: "首爾",
        en_name: "Seoul",
        lat: 37.5665,
        lng: 126.9780,
        radius_m: 20000,
        address_keywords: &["서울", "Seoul", "Korea", "韓國"],
    },
    CityConfig {
        name: "釜山",
        en_name: "Busan",
        lat: 35.1796,
        lng: 129.0756,
        radius_m: 15000,
        address_keywords: &["부산", "Busan", "Korea"],
    },
    // 東南亞
    CityConfig {
        name: "曼谷",
        en_name: "Bangkok",
        lat: 13.7563,
        lng: 100.5018,
        radius_m: 25000,
        address_keywords: &["Bangkok", "กรุงเทพ", "Thailand", "泰國"],
    },
    CityConfig {
        name: "新加坡",
        en_name: "Singapore",
        lat: 1.3521,
        lng: 103.8198,
        radius_m: 15000,
        address_keywords: &["Singapore", "新加坡"],
    },
    CityConfig {
        name: "吉隆坡",
        en_name: "Kuala Lumpur",
        lat: 3.1390,
        lng: 101.6869,
        radius_m: 15000,
        address_keywords: &["Kuala Lumpur", "KL", "Malaysia"],
    },
    CityConfig {
        name: "峇里島",
        en_name: "Bali",
        lat: -8.3405,
        lng: 115.0920,
        radius_m: 30000,
        address_keywords: &["Bali", "Indonesia"],
    },
    CityConfig {
        name: "河內",
        en_name: "Hanoi",
        lat: 21.0278,
        lng: 105.8342,
        radius_m: 15000,
        address_keywords: &["Hanoi", "Hà Nội", "Vietnam"],
    },
    CityConfig {
        name: "胡志明",
        en_name: "Ho Chi Minh",
        lat: 10.8231,
        lng: 106.6297,
        radius_m: 20000,
        address_keywords: &["Ho Chi Minh", "Hồ Chí Minh", "Saigon", "Vietnam"],
    },
    CityConfig {
        name: "清邁",
        en_name: "Chiang Mai",
        lat: 18.7883,
        lng: 98.9853,
        radius_m: 15000,
        address_keywords: &["Chiang Mai", "เชียงใหม่", "Thailand"],
    },
    CityConfig {
        name: "馬尼拉",
        en_name: "Manila",
        lat: 14.5995,
        lng: 120.9842,
        radius_m: 15000,
        address_keywords: &["Manila", "Philippines"],
    },
    // 港澳中國
    CityConfig {
        name: "香港",
        en_name: "Hong Kong",
        lat: 22.3193,
        lng: 114.1694,
        radius_m: 15000,
        address_keywords: &["香港", "Hong Kong"],
    },
    CityConfig {
        name: "澳門",
        en_name: "Macau",
        lat: 22.1987,
        lng: 113.5439,
        radius_m: 10000,
        address_keywords: &["澳門", "Macau", "Macao"],
    },
    CityConfig {
        name: "上海",
        en_name: "Shanghai",
        lat: 31.2304,
        lng: 121.4737,
        radius_m: 25000,
        address_keywords: &["上海", "Shanghai", "China"],
    },
    CityConfig {
        name: "北京",
        en_name: "Beijing",
        lat: 39.9042,
        lng: 116.4074,
        radius_m: 25000,
        address_keywords: &["北京", "Beijing", "China"],
    },
    CityConfig {
        name: "成都",
        en_name: "Chengdu",
        lat: 30.5723,
        lng: 104.0665,
        radius_m: 20000,
        address_keywords: &["成都", "Chengdu", "China"],
    },
    // 歐洲
    CityConfig {
        name: "巴黎",
        en_name: "Paris",
        lat: 48.8566,
        lng: 2.3522,
        radius_m: 15000,
        address_keywords: &["Paris", "France", "法國"],
    },
    CityConfig {
        name: "倫敦",
        en_name: "London",
        lat: 51.5074,
        lng: -0.1278,
        radius_m: 20000,
        address_keywords: &["London", "UK", "United Kingdom", "英國"],
    },
    CityConfig {
        name: "羅馬",
        en_name: "Rome",
        lat: 41.9028,
        lng: 12.4964,
        radius_m: 15000,
        address_keywords: &["Roma", "Rome", "Italy", "義大利"],
    },
    CityConfig {
        name: "巴塞隆納",
        en_name: "Barcelona",
        lat: 41.3874,
        lng: 2.1686,
        radius_m: 15000,
        address_keywords: &["Barcelona", "Spain", "西班牙"],
    },
    CityConfig {
        name: "米蘭",
        en_name: "Milan",
        lat: 45.4642,
        lng: 9.1900,
        radius_m: 15000,
        address_keywords: &["Milan", "Milano", "Italy"],
    },
    CityConfig {
        name: "阿姆斯特丹",
        en_name: "Amsterdam",
        lat: 52.3676,
        lng: 4.9041,
        radius_m: 12000,
        address_keywords: &["Amsterdam", "Netherlands", "荷蘭"],
    },
    CityConfig {
        name: "柏林",
        en_name: "Berlin",
        lat: 52.5200,
        lng: 13.4050,
        radius_m: 15000,
        address_keywords: &["Berlin", "Germany", "德國"],
    },
    CityConfig {
        name: "維也納",
        en_name: "Vienna",
        lat: 48.2082,
        lng: 16.3738,
        radius_m: 12000,
        address_keywords: &["Wien", "Vienna", "Austria"],
    },
    CityConfig {
        name: "布拉格",
        en_name: "Prague",
        lat: 50.0755,
        lng: 14.4378,
        radius_m: 12000,
        address_keywords: &["Praha", "Prague", "Czech"],
    },
    CityConfig {
        name: "伊斯坦堡",
        en_name: "Istanbul",
        lat: 41.0082,
        lng: 28.9784,
        radius_m: 20000,
        address_keywords: &["Istanbul", "İstanbul", "Turkey", "Türkiye"],
    },
    // 美洲
    CityConfig {
        name: "紐約",
        en_name: "New York",
        lat: 40.7128,
        lng: -74.0060,
        radius_m: 20000,
        address_keywords: &["New York", "NY", "Manhattan", "Brooklyn", "NYC"],
    },
    CityConfig {
        name: "洛杉磯",
        en_name: "Los Angeles",
        lat: 34.0522,
        lng: -118.2437,
        radius_m: 30000,
        address_keywords: &["Los Angeles", "LA", "California", "CA"],
    },
    CityConfig {
        name: "舊金山",
        en_name: "San Francisco",
        lat: 37.7749,
        lng: -122.4194,
        radius_m: 15000,
        address_keywords: &["San Francisco", "SF", "California"],
    },
    CityConfig {
        name: "芝加哥",
        en_name: "Chicago",
        lat: 41.8781,
        lng: -87.6298,
        radius_m: 20000,
        address_keywords: &["Chicago", "IL", "Illinois"],
    },
    CityConfig {
        name: "拉斯維加斯",
        en_name: "Las Vegas",
        lat: 36.1699,
        lng: -115.1398,
        radius_m: 15000,
        address_keywords: &["Las Vegas", "NV", "Nevada"],
    },
    CityConfig {
        name: "溫哥華",
        en_name: "Vancouver",
        lat: 49.2827,
        lng: -123.1207,
        radius_m: 15000,
        address_keywords: &["Vancouver", "BC", "Canada"],
    },
    CityConfig {
        name: "多倫多",
        en_name: "Toronto",
        lat: 43.6532,
        lng: -79.3832,
        radius_m: 15000,
        address_keywords: &["Toronto", "ON", "Ontario", "Canada"],
    },
    // 大洋洲
    CityConfig {
        name: "雪梨",
        en_name: "Sydney",
        lat: -33.8688,
        lng: 151.2093,
        radius_m: 20000,
        address_keywords: &["Sydney", "NSW", "Australia"],
    },
    CityConfig {
        name: "墨爾本",
        en_name: "Melbourne",
        lat: -37.8136,
        lng: 144.9631,
        radius_m: 20000,
        address_keywords: &["Melbourne", "VIC", "Australia"],
    },
    // 中東
    CityConfig {
        name: "杜拜",
        en_name: "Dubai",
        lat: 25.2048,
        lng: 55.2708,
        radius_m: 20000,
        address_keywords: &["Dubai", "UAE", "杜拜"],
    },
];

/// Immutable registry of city geo configurations, keyed by canonical name
pub struct CityDirectory {
    map: HashMap<&'static str, &'static CityConfig>,
}

impl CityDirectory {
    pub fn new() -> Self {
        Self {
            map: CONFIGS.iter().map(|c| (c.name, c)).collect(),
        }
    }

    /// Config for a canonical city. Cities without an entry (alias-only
    /// cities such as 廣州) bias lookups with the default city's config.
    pub fn get(&self, city: &str) -> &'static CityConfig {
        self.map
            .get(city)
            .copied()
            .unwrap_or_else(|| self.default_city())
    }

    /// The default (台北) entry
    pub fn default_city(&self) -> &'static CityConfig {
        self.map[super::DEFAULT_CITY]
    }

    /// Whether the city has its own geo entry
    pub fn contains(&self, city: &str) -> bool {
        self.map.contains_key(city)
    }
}

impl Default for CityDirectory {
    fn default() -> Self {
        Self::new()
    }
}
