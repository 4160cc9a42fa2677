/// URL catalogue of the upstream shipping API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub fn token(&self) -> String {
        self.join("v2/oauth/token")
    }

    pub fn suggest_cities(&self) -> String {
        self.join("v2/location/suggest/cities")
    }

    pub fn regions(&self) -> String {
        self.join("v2/location/regions")
    }

    pub fn postal_codes(&self) -> String {
        self.join("v2/location/postalcodes")
    }

    pub fn cities(&self) -> String {
        self.join("v2/location/cities")
    }

    pub fn delivery_points(&self) -> String {
        self.join("v2/deliverypoints")
    }

    pub fn tariff_list(&self) -> String {
        self.join("v2/calculator/tarifflist")
    }

    pub fn tariff(&self) -> String {
        self.join("v2/calculator/tariff")
    }

    pub fn tariff_and_service(&self) -> String {
        self.join("v2/calculator/tariffAndService")
    }

    pub fn all_tariffs(&self) -> String {
        self.join("v2/calculator/alltariffs")
    }

    pub fn restrictions(&self) -> String {
        self.join("v2/international/package/restrictions")
    }

    pub fn orders(&self) -> String {
        self.join("v2/orders")
    }

    pub fn order(&self, uuid: &str) -> String {
        self.join(&format!("v2/orders/{}", uuid))
    }
}
