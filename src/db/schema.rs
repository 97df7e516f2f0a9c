diesel::table! {
    homes (id) {
        id -> Integer,
        rm -> Double,
        lstat -> Double,
        dis -> Double,
        tax -> Double,
        ptratio -> Double,
        age -> Double,
        indus -> Double,
        medv -> Double,
    }
}
