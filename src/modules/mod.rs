pub mod account {
    pub mod schema;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod service;
}

pub mod friendship {
    pub mod schema;
    pub mod pair;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod service;
    pub mod handle;
    pub mod route;
}

pub mod profile {
    pub mod model;
    pub mod service;
    pub mod handle;
    pub mod route;
}
